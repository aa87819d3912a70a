use std::path::Path;

use crate::ai::HyperParams;
use crate::error::ConfigError;
use crate::training::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub hyper: HyperParams,
    pub training: TrainerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hyper = &self.hyper;
        if !(hyper.learning_rate > 0.0 && hyper.learning_rate <= 1.0) {
            return Err(ConfigError::Validation(
                "hyper.learning_rate must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&hyper.discount_factor) {
            return Err(ConfigError::Validation(
                "hyper.discount_factor must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&hyper.explore_rate) {
            return Err(ConfigError::Validation(
                "hyper.explore_rate must be in [0, 1]".into(),
            ));
        }

        if self.training.eval_games == 0 {
            return Err(ConfigError::Validation(
                "training.eval_games must be > 0".into(),
            ));
        }
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
