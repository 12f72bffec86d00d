use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use ljmd::engine::config::{SimulationConfig, SimulationConfigBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialForceFieldConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    epsilon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sigma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    r_min: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialIntegrationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    dt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_steps: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialOutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    write_frequency: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress_interval: Option<usize>,
}

/// The TOML configuration file, with every value optional.
///
/// Values are resolved in order of precedence: `-S key=value`, then dedicated
/// command-line flags, then the file, then the library defaults.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialSimulationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    force_field: Option<PartialForceFieldConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    integration: Option<PartialIntegrationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PartialOutputConfig>,
}

impl From<&SimulationConfig> for PartialSimulationConfig {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            force_field: Some(PartialForceFieldConfig {
                epsilon: Some(config.force_field.epsilon),
                sigma: Some(config.force_field.sigma),
                r_min: Some(config.force_field.r_min),
            }),
            integration: Some(PartialIntegrationConfig {
                dt: Some(config.dt),
                total_steps: Some(config.total_steps),
            }),
            output: Some(PartialOutputConfig {
                write_frequency: Some(config.write_frequency),
                progress_interval: Some(config.progress_interval),
            }),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialSimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| CliError::Other(e.into()))
    }

    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<SimulationConfig> {
        self.apply_cli_flags(args);
        self.apply_set_values(&args.set_values)?;
        self.into_config()
    }

    fn apply_cli_flags(&mut self, args: &RunArgs) {
        let ff = self.force_field.get_or_insert_with(Default::default);
        ff.epsilon = args.epsilon.or(ff.epsilon);
        ff.sigma = args.sigma.or(ff.sigma);
        ff.r_min = args.r_min.or(ff.r_min);

        let integration = self.integration.get_or_insert_with(Default::default);
        integration.dt = args.dt.or(integration.dt);
        integration.total_steps = args.total_steps.or(integration.total_steps);

        let output = self.output.get_or_insert_with(Default::default);
        output.write_frequency = args.write_frequency.or(output.write_frequency);
        output.progress_interval = args.progress_interval.or(output.progress_interval);
    }

    fn into_config(self) -> Result<SimulationConfig> {
        let ff = self.force_field.unwrap_or_default();
        let integration = self.integration.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let mut builder = SimulationConfigBuilder::new();
        if let Some(epsilon) = ff.epsilon {
            builder = builder.epsilon(epsilon);
        }
        if let Some(sigma) = ff.sigma {
            builder = builder.sigma(sigma);
        }
        if let Some(r_min) = ff.r_min {
            builder = builder.r_min(r_min);
        }
        if let Some(dt) = integration.dt {
            builder = builder.dt(dt);
        }
        if let Some(steps) = integration.total_steps {
            builder = builder.total_steps(steps);
        }
        if let Some(frequency) = output.write_frequency {
            builder = builder.write_frequency(frequency);
        }
        if let Some(interval) = output.progress_interval {
            builder = builder.progress_interval(interval);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let (key, value_str) = (key.trim(), value_str.trim());

            match key {
                "force-field.epsilon" => {
                    self.force_field.get_or_insert_with(Default::default).epsilon =
                        Some(parse_value(key, value_str, "float")?);
                }
                "force-field.sigma" => {
                    self.force_field.get_or_insert_with(Default::default).sigma =
                        Some(parse_value(key, value_str, "float")?);
                }
                "force-field.r-min" => {
                    self.force_field.get_or_insert_with(Default::default).r_min =
                        Some(parse_value(key, value_str, "float")?);
                }
                "integration.dt" => {
                    self.integration.get_or_insert_with(Default::default).dt =
                        Some(parse_value(key, value_str, "float")?);
                }
                "integration.total-steps" => {
                    self.integration
                        .get_or_insert_with(Default::default)
                        .total_steps = Some(parse_value(key, value_str, "integer")?);
                }
                "output.write-frequency" => {
                    self.output
                        .get_or_insert_with(Default::default)
                        .write_frequency = Some(parse_value(key, value_str, "integer")?);
                }
                "output.progress-interval" => {
                    self.output
                        .get_or_insert_with(Default::default)
                        .progress_interval = Some(parse_value(key, value_str, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
