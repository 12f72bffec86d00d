use crate::config::PartialSimulationConfig;
use crate::error::Result;
use ljmd::engine::config::SimulationConfig;

pub fn render() -> Result<String> {
    PartialSimulationConfig::from(&SimulationConfig::default()).to_toml_string()
}

pub fn run() -> Result<()> {
    print!("{}", render()?);
    Ok(())
}
