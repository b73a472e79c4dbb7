#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! # Environment Variables
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `FAMSLAM_SWIPE_RATIO` | float in `(0, 1]` | `0.75` |
//! | `FAMSLAM_SWIPE_AXIS` | `horizontal`/`x`, `vertical`/`y` | `horizontal` |
//! | `FAMSLAM_STATE_PATH` | file path | `$XDG_STATE_HOME/famslam/recipes.json` |
//! | `FAMSLAM_LOG_FORMAT` | `pretty`, `json` | `pretty` |
//!
//! Blank values count as unset.

use crate::logging::LogFormat;
use crate::store::RecipeStore;
use famslam_core::event::Axis;
use famslam_core::gesture::SwipeConfig;
use std::fmt;
use std::path::PathBuf;

/// Swipe threshold as a fraction of row extent, in `(0, 1]`.
pub const ENV_SWIPE_RATIO: &str = "FAMSLAM_SWIPE_RATIO";
/// Swipe axis: `horizontal` or `vertical`.
pub const ENV_SWIPE_AXIS: &str = "FAMSLAM_SWIPE_AXIS";
/// Recipe file path.
pub const ENV_STATE_PATH: &str = "FAMSLAM_STATE_PATH";
/// Log format: `pretty` or `json`.
pub const ENV_LOG_FORMAT: &str = "FAMSLAM_LOG_FORMAT";

/// An environment value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Variable name.
    pub var: &'static str,
    /// Offending value.
    pub value: String,
    /// What was expected.
    pub message: &'static str,
}

impl ConfigError {
    fn new(var: &'static str, value: impl Into<String>, message: &'static str) -> Self {
        Self {
            var,
            value: value.into(),
            message,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.var, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration for the list and its storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    /// Swipe recognition parameters.
    pub swipe: SwipeConfig,
    /// Recipe file override. `None` uses the default location.
    pub state_path: Option<PathBuf>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl EngineConfig {
    /// Set the swipe parameters.
    #[must_use]
    pub fn with_swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    /// Use `path` as the recipe file.
    #[must_use]
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = Some(path.into());
        self
    }

    /// Set the log output format.
    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read configuration through a custom lookup (for tests).
    ///
    /// Stops at the first unusable value.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut get = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_SWIPE_RATIO) {
            let ratio = value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|r| *r > 0.0 && *r <= 1.0)
                .ok_or_else(|| {
                    ConfigError::new(ENV_SWIPE_RATIO, &value, "expected number in (0, 1]")
                })?;
            config.swipe = config.swipe.with_threshold_ratio(ratio);
        }

        if let Some(value) = get(ENV_SWIPE_AXIS) {
            let axis = Axis::parse(&value).ok_or_else(|| {
                ConfigError::new(ENV_SWIPE_AXIS, &value, "expected horizontal|vertical")
            })?;
            config.swipe = config.swipe.with_axis(axis);
        }

        if let Some(value) = get(ENV_STATE_PATH) {
            config.state_path = Some(PathBuf::from(value.trim()));
        }

        if let Some(value) = get(ENV_LOG_FORMAT) {
            config.log_format = LogFormat::parse(&value)
                .ok_or_else(|| ConfigError::new(ENV_LOG_FORMAT, &value, "expected pretty|json"))?;
        }

        Ok(config)
    }

    /// Recipe file this configuration points at.
    #[cfg(feature = "state-persistence")]
    #[must_use]
    pub fn resolved_state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(crate::store::default_path)
    }

    /// Open the recipe store this configuration describes.
    ///
    /// Without the `state-persistence` feature the store is in memory.
    #[must_use]
    pub fn open_store(&self) -> RecipeStore {
        #[cfg(feature = "state-persistence")]
        {
            RecipeStore::with_file(self.resolved_state_path())
        }
        #[cfg(not(feature = "state-persistence"))]
        {
            RecipeStore::in_memory()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = EngineConfig::from_env_with(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.swipe.threshold_ratio, 0.75);
        assert_eq!(config.swipe.axis, Axis::Horizontal);
    }

    #[test]
    fn all_variables_parse() {
        let config = EngineConfig::from_env_with(lookup(&[
            (ENV_SWIPE_RATIO, "0.5"),
            (ENV_SWIPE_AXIS, "vertical"),
            (ENV_STATE_PATH, "/tmp/recipes.json"),
            (ENV_LOG_FORMAT, "json"),
        ]))
        .unwrap();
        assert_eq!(config.swipe.threshold_ratio, 0.5);
        assert_eq!(config.swipe.axis, Axis::Vertical);
        assert_eq!(config.state_path, Some(PathBuf::from("/tmp/recipes.json")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_values_are_unset() {
        let config =
            EngineConfig::from_env_with(lookup(&[(ENV_SWIPE_RATIO, " "), (ENV_STATE_PATH, "")]))
                .unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        for bad in ["0", "1.5", "-0.2", "NaN", "abc"] {
            let err = EngineConfig::from_env_with(lookup(&[(ENV_SWIPE_RATIO, bad)])).unwrap_err();
            assert_eq!(err.var, ENV_SWIPE_RATIO);
            assert_eq!(err.value, bad);
        }
    }

    #[test]
    fn bad_axis_and_format_are_rejected() {
        let err = EngineConfig::from_env_with(lookup(&[(ENV_SWIPE_AXIS, "diagonal")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "FAMSLAM_SWIPE_AXIS=diagonal (expected horizontal|vertical)"
        );
        let err = EngineConfig::from_env_with(lookup(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert_eq!(err.var, ENV_LOG_FORMAT);
    }

    #[test]
    fn builders_override_fields() {
        let config = EngineConfig::default()
            .with_swipe(SwipeConfig::default().with_threshold_ratio(0.6))
            .with_state_path("here.json")
            .with_log_format(LogFormat::Json);
        assert_eq!(config.swipe.threshold_ratio, 0.6);
        assert_eq!(config.state_path, Some(PathBuf::from("here.json")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn explicit_state_path_wins() {
        let config = EngineConfig::default().with_state_path("/data/r.json");
        assert_eq!(config.resolved_state_path(), PathBuf::from("/data/r.json"));
        assert_eq!(config.open_store().backend_name(), "FileStorage");
    }
}
