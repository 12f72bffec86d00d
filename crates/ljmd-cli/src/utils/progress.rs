use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ljmd::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

const BAR_TEMPLATE: &str = "{msg} [{bar:40.cyan/blue}] {pos}/{len} steps ({eta})";

/// Renders simulation progress as a step bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        pb.finish_and_clear();
        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::RunStart { total_steps } => {
                    pb.reset();
                    pb.set_length(total_steps);
                    pb.set_style(Self::bar_style());
                    pb.set_message("Integrating");
                }
                Progress::StepsCompleted { steps } => pb.inc(steps),
                Progress::ForceClamped { step, pairs } => {
                    pb.println(format!(
                        "  step {step}: {pairs} pair(s) inside the force floor, forces clamped"
                    ));
                }
                Progress::RunFinish { max_relative_drift } => {
                    if let Some(length) = pb.length() {
                        pb.set_position(length);
                    }
                    pb.finish_with_message(format!("✓ Done (drift {max_relative_drift:.2e})"));
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
