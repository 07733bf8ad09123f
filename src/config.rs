use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CONFIG_FILE: &str = "frac_repl.toml";

/// Settings for the interactive calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Denominator bound used by `approx` when none is given.
    pub max_denominator: u64,
    pub history_size: usize,
    pub prompt: String,
    /// Log rejected operations at debug level.
    pub verbose: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            max_denominator: 1_000_000,
            history_size: 100,
            prompt: ">> ".to_string(),
            verbose: false,
        }
    }
}

impl ReplConfig {
    /// Reads `frac_repl.toml` from the working directory, falling back to
    /// defaults when it is missing or broken.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config file, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let config: ReplConfig = toml::from_str(content)?;
        if config.max_denominator == 0 {
            warn!("max_denominator must be positive, using the default");
            return Ok(ReplConfig {
                max_denominator: Self::default().max_denominator,
                ..config
            });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ReplConfig::from_toml_str("max_denominator = 64\nverbose = true\n").unwrap();
        assert_eq!(config.max_denominator, 64);
        assert!(config.verbose);
        assert_eq!(config.history_size, 100);
        assert_eq!(config.prompt, ">> ");
    }

    #[test]
    fn test_zero_bound_replaced() {
        let config = ReplConfig::from_toml_str("max_denominator = 0").unwrap();
        assert_eq!(config.max_denominator, 1_000_000);
    }

    #[test]
    fn test_bad_file() {
        assert!(ReplConfig::from_toml_str("max_denominator = \"lots\"").is_err());
        let missing = ReplConfig::load_from(Path::new("/nonexistent/frac_repl.toml"));
        assert_eq!(missing, ReplConfig::default());
    }
}
