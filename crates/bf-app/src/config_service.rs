//! Run configuration loading, overriding, validation and introspection.

use std::path::Path;

use bf_config::{ClosureDef, ConditionDef, RunConfig, validate_config};

use crate::error::{AppError, AppResult};

/// Command-line style overrides applied on top of a loaded config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub closure: Option<ClosureDef>,
    pub condition: Option<ConditionDef>,
    pub tauf_fm: Option<f64>,
    pub dtau_fm: Option<f64>,
    pub steps_per_sample: Option<usize>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(closure) = self.closure {
            config.closure = closure;
        }
        if let Some(condition) = &self.condition {
            config.initial.condition = condition.clone();
        }
        if let Some(tauf) = self.tauf_fm {
            config.evolution.tauf_fm = tauf;
        }
        if let Some(dtau) = self.dtau_fm {
            config.evolution.dtau_fm = dtau;
        }
        if let Some(every) = self.steps_per_sample {
            config.evolution.steps_per_sample = every;
        }
    }
}

/// Load a config file (YAML, or JSON by extension), or the built-in defaults
/// when no path is given, then apply overrides and validate the result.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> AppResult<RunConfig> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::ConfigFileRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                });
            }
            bf_config::load(path)?
        }
        None => RunConfig::default(),
    };
    overrides.apply(&mut config);
    validate_config(&config)?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &RunConfig) -> AppResult<()> {
    bf_config::save_yaml(path, config)?;
    Ok(())
}

/// Human-oriented digest of a config.
#[derive(Debug, Clone)]
pub struct ConfigSummary {
    pub name: String,
    pub temperature_gev: f64,
    pub tau0_fm: f64,
    pub tauf_fm: f64,
    pub dtau_fm: f64,
    pub steps: usize,
    pub samples: usize,
    pub closure: &'static str,
    pub initial_condition: &'static str,
}

pub fn summarize(config: &RunConfig) -> AppResult<ConfigSummary> {
    let settings = crate::runtime_compile::compile_settings(config)?;
    let steps = settings.steps();
    Ok(ConfigSummary {
        name: config.name.clone(),
        temperature_gev: config.initial.temperature_gev,
        tau0_fm: config.initial.tau0_fm,
        tauf_fm: config.evolution.tauf_fm,
        dtau_fm: config.evolution.dtau_fm,
        steps,
        samples: 1 + steps / settings.steps_per_sample,
        closure: settings.closure.name(),
        initial_condition: settings.initial.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides = ConfigOverrides {
            closure: Some(ClosureDef::Kinetic),
            tauf_fm: Some(2.0),
            ..Default::default()
        };
        let mut config = RunConfig::default();
        overrides.apply(&mut config);

        assert_eq!(config.closure, ClosureDef::Kinetic);
        assert_eq!(config.evolution.tauf_fm, 2.0);
        assert_eq!(config.evolution.dtau_fm, 0.01);
        assert_eq!(config.initial.condition, ConditionDef::Equilibrium);
        assert!(!overrides.is_empty());
        assert!(ConfigOverrides::default().is_empty());
    }

    #[test]
    fn defaults_load_without_a_file() {
        let config = load_config(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn invalid_override_is_rejected() {
        let overrides = ConfigOverrides {
            dtau_fm: Some(-0.01),
            ..Default::default()
        };
        assert!(matches!(
            load_config(None, &overrides),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("bf_app_missing_config.yaml");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            load_config(Some(&path), &ConfigOverrides::default()),
            Err(AppError::ConfigFileRead { .. })
        ));
    }

    #[test]
    fn summary_counts_steps_and_samples() {
        let overrides = ConfigOverrides {
            tauf_fm: Some(1.0),
            ..Default::default()
        };
        let config = load_config(None, &overrides).unwrap();
        let summary = summarize(&config).unwrap();
        assert_eq!(summary.steps, 75);
        assert_eq!(summary.samples, 8);
        assert_eq!(summary.closure, "fixed_mass");
        assert_eq!(summary.initial_condition, "equilibrium");
    }
}
