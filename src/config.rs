use crate::catalog::{Catalog, ExperimentId};
use crate::error::LabError;
use serde::{Deserialize, Serialize};

/// Main configuration structure loaded from light_lab.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub lab: LabConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
    /// Problems found while loading, logged once tracing is up
    #[serde(skip)]
    pub load_warnings: Vec<String>,
}

/// Lab-wide text and the experiment shown first
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LabConfig {
    pub title: String,
    pub intro: String,
    pub default_experiment: u8,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            title: "Light & Color - Virtual Experiment Lab".to_string(),
            intro: "This small lab helps learners explore how light and colour behave using simple \
                home materials. Each activity is meant to support learning by doing."
                .to_string(),
            default_experiment: 3,
        }
    }
}

/// Which optional page sections are rendered
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_quick_setup: bool,
    pub show_reflection_checks: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_quick_setup: true,
            show_reflection_checks: true,
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub no_log: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "light_lab=info".to_string(),
            no_log: false,
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "light_lab=info".to_string()),
            no_log: std::env::var("LIGHT_LAB_NO_LOG")
                .ok()
                .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses LIGHT_LAB_CONFIG or defaults to "light_lab.toml".
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(env_path) = std::env::var("LIGHT_LAB_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::dotenv();
        }

        let config_path =
            std::env::var("LIGHT_LAB_CONFIG").unwrap_or_else(|_| "light_lab.toml".to_string());
        let mut config = Self::load_from_path(&config_path)?;

        if let Ok(raw) = std::env::var("LIGHT_LAB_DEFAULT_EXPERIMENT") {
            config.apply_default_override(&raw);
        }

        config.runtime = RuntimeConfig::load_from_env();
        Ok(config)
    }

    /// Read one TOML file; a missing file gives defaults plus a load warning
    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::from_toml_str(&content)?),
            Err(_) => {
                let mut config = Self::default();
                config
                    .load_warnings
                    .push(format!("Config file {path} not found, using defaults"));
                Ok(config)
            }
        }
    }

    fn apply_default_override(&mut self, raw: &str) {
        match raw.trim().parse::<u8>() {
            Ok(id) => self.lab.default_experiment = id,
            Err(_) => self.load_warnings.push(format!(
                "LIGHT_LAB_DEFAULT_EXPERIMENT '{raw}' is not a number, ignoring"
            )),
        }
    }

    /// Emit the warnings collected by `load`
    pub fn log_load_warnings(&self) {
        for warning in &self.load_warnings {
            tracing::warn!("{}", warning);
        }
    }

    /// Parse the TOML part of the configuration
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn default_experiment(&self) -> ExperimentId {
        ExperimentId(self.lab.default_experiment)
    }

    /// Check configuration against the built catalog
    pub fn validate(&self, catalog: &Catalog) -> crate::Result<()> {
        if self.lab.title.trim().is_empty() {
            return Err(LabError::Config {
                message: "lab.title must not be empty".into(),
            });
        }
        if !catalog.contains(self.default_experiment()) {
            return Err(LabError::Config {
                message: format!(
                    "lab.default_experiment {} is not in the catalog",
                    self.lab.default_experiment
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.lab.default_experiment, 3);
        assert!(config.display.show_quick_setup);
        assert!(config.display.show_reflection_checks);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [lab]
            default_experiment = 5

            [display]
            show_quick_setup = false
            "#,
        )
        .unwrap();
        assert_eq!(config.default_experiment(), ExperimentId(5));
        assert_eq!(config.lab.title, LabConfig::default().title);
        assert!(!config.display.show_quick_setup);
        assert!(config.display.show_reflection_checks);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = Config::from_toml_str("[lab\ntitle = 1").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_missing_file_is_reported_after_load() {
        let config = Config::load_from_path("/nonexistent/light_lab.toml").unwrap();
        assert_eq!(config.lab.default_experiment, 3);
        assert_eq!(config.load_warnings.len(), 1);
        assert!(config.load_warnings[0].contains("not found"));
    }

    #[test]
    fn test_default_override() {
        let mut config = Config::default();
        config.apply_default_override(" 5 ");
        assert_eq!(config.default_experiment(), ExperimentId(5));
        assert!(config.load_warnings.is_empty());

        config.apply_default_override("five");
        assert_eq!(config.default_experiment(), ExperimentId(5));
        assert_eq!(config.load_warnings.len(), 1);
        assert!(config.load_warnings[0].contains("'five'"));
    }

    #[test]
    fn test_validate_default_experiment() {
        let catalog = Catalog::load().unwrap();
        let mut config = Config::default();
        assert!(config.validate(catalog).is_ok());
        config.lab.default_experiment = 9;
        assert!(config.validate(catalog).is_err());
    }
}
