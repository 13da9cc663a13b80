//! Runtime configuration
//!
//! Values come from a TOML file (an explicit `--config` path, or
//! `mapsat.toml` in the working directory when present) and are then
//! overridden by `MAPSAT_*` environment variables.

use crate::error::{MapSatError, Result};
use crate::fixtures::DEFAULT_TOLERANCE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "mapsat.toml";

pub const ENV_LOG_LEVEL: &str = "MAPSAT_LOG_LEVEL";
pub const ENV_TOLERANCE: &str = "MAPSAT_TOLERANCE";
pub const ENV_FIXTURES: &str = "MAPSAT_FIXTURES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapSatConfig {
    /// Tolerance used when comparing fixture results
    pub tolerance: f64,
    /// Log filter used when no `-v` flag is given
    pub log_level: Option<String>,
    /// Fixture file run instead of the built-in suite
    pub fixtures: Option<PathBuf>,
}

impl Default for MapSatConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            log_level: None,
            fixtures: None,
        }
    }
}

impl MapSatConfig {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| MapSatError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or from the default file if it exists,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::read(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.merge_env_vars()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MapSatError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Apply `MAPSAT_*` overrides from the process environment
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = Some(level);
        }

        if let Some(raw) = lookup(ENV_TOLERANCE) {
            self.tolerance = raw.trim().parse().map_err(|_| {
                MapSatError::Config(format!("{ENV_TOLERANCE} must be a number, got '{raw}'"))
            })?;
        }

        if let Some(path) = lookup(ENV_FIXTURES) {
            self.fixtures = Some(PathBuf::from(path));
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(MapSatError::Config(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MapSatConfig::default();
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert!(config.log_level.is_none());
        assert!(config.fixtures.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let config = MapSatConfig::from_toml_str(
            r#"
tolerance = 0.05
log_level = "debug"
fixtures = "suite.yaml"
"#,
        )
        .unwrap();
        assert_eq!(config.tolerance, 0.05);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.fixtures, Some(PathBuf::from("suite.yaml")));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MapSatConfig::from_toml_str("log_level = \"warn\"").unwrap();
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_tolerance() {
        assert!(MapSatConfig::from_toml_str("tolerence = 0.1").is_err());
        assert!(MapSatConfig::from_toml_str("tolerance = -1.0").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = MapSatConfig::default();
        config
            .merge_env_with(env(&[
                (ENV_LOG_LEVEL, "trace"),
                (ENV_TOLERANCE, " 0.2 "),
                (ENV_FIXTURES, "/tmp/f.json"),
            ]))
            .unwrap();
        assert_eq!(config.log_level.as_deref(), Some("trace"));
        assert_eq!(config.tolerance, 0.2);
        assert_eq!(config.fixtures, Some(PathBuf::from("/tmp/f.json")));
    }

    #[test]
    fn test_env_tolerance_must_parse() {
        let mut config = MapSatConfig::default();
        let err = config
            .merge_env_with(env(&[(ENV_TOLERANCE, "tight")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TOLERANCE));
    }
}
