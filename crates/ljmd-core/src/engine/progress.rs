/// Events emitted by a running simulation for interactive front ends.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    RunStart { total_steps: u64 },
    /// Steps completed since the previous report.
    StepsCompleted { steps: u64 },
    /// First time pair forces had to be clamped; `step` is 0 for the initial
    /// configuration.
    ForceClamped { step: usize, pairs: usize },
    RunFinish { max_relative_drift: f64 },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
