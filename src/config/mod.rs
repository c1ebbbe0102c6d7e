//! Configuration system with YAML schema and validation.
//!
//! Mistake-proofing through:
//! - Type-safe configuration structs
//! - Unknown keys rejected at parse time
//! - Range validation via `validator`
//! - Semantic validation of cross-field constraints

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::engine::guard::GuardConfig;
use crate::error::{VizError, VizResult};

/// Top-level visualizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Sorting engine settings.
    #[validate(nested)]
    #[serde(default)]
    pub sorting: SortingConfig,

    /// Pathfinding engine settings.
    #[validate(nested)]
    #[serde(default)]
    pub pathfinding: PathfindingConfig,

    /// Log retention.
    #[validate(nested)]
    #[serde(default)]
    pub log: LogConfig,

    /// Invariant guards.
    #[serde(default)]
    pub guard: GuardConfig,

    /// Random input generation.
    #[validate(nested)]
    #[serde(default)]
    pub input: InputConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Validate constraints spanning several fields.
    fn validate_semantic(&self) -> VizResult<()> {
        if self.input.min_value > self.input.max_value {
            return Err(VizError::config(format!(
                "input.min_value ({}) exceeds input.max_value ({})",
                self.input.min_value, self.input.max_value
            )));
        }
        if self.log.capacity == Some(0) {
            return Err(VizError::config("log.capacity must be at least 1 when set"));
        }
        Ok(())
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            sorting: SortingConfig::default(),
            pathfinding: PathfindingConfig::default(),
            log: LogConfig::default(),
            guard: GuardConfig::default(),
            input: InputConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    sort_delay_ms: Option<u64>,
    path_delay_ms: Option<u64>,
    grid: Option<(usize, usize)>,
    log_capacity: Option<usize>,
    guard: Option<bool>,
    seed: Option<u64>,
}

impl VizConfigBuilder {
    /// Set the sorting step delay.
    #[must_use]
    pub const fn sort_delay_ms(mut self, ms: u64) -> Self {
        self.sort_delay_ms = Some(ms);
        self
    }

    /// Set the pathfinding step delay.
    #[must_use]
    pub const fn path_delay_ms(mut self, ms: u64) -> Self {
        self.path_delay_ms = Some(ms);
        self
    }

    /// Set the grid dimensions.
    #[must_use]
    pub const fn grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = Some((rows, cols));
        self
    }

    /// Cap the log.
    #[must_use]
    pub const fn log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = Some(capacity);
        self
    }

    /// Enable or disable invariant guards.
    #[must_use]
    pub const fn guard(mut self, enabled: bool) -> Self {
        self.guard = Some(enabled);
        self
    }

    /// Set the random input seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(ms) = self.sort_delay_ms {
            config.sorting.step_delay_ms = ms;
        }
        if let Some(ms) = self.path_delay_ms {
            config.pathfinding.step_delay_ms = ms;
        }
        if let Some((rows, cols)) = self.grid {
            config.pathfinding.rows = rows;
            config.pathfinding.cols = cols;
        }
        if let Some(capacity) = self.log_capacity {
            config.log.capacity = Some(capacity);
        }
        if let Some(enabled) = self.guard {
            config.guard.enabled = enabled;
        }
        if let Some(seed) = self.seed {
            config.input.seed = seed;
        }

        config
    }
}

/// Sorting engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SortingConfig {
    /// Pause after each sorting step, in milliseconds.
    #[validate(range(max = 60_000))]
    #[serde(default = "default_sort_delay_ms")]
    pub step_delay_ms: u64,
}

const fn default_sort_delay_ms() -> u64 {
    500
}

impl SortingConfig {
    /// Step delay as a duration.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_sort_delay_ms(),
        }
    }
}

/// Pathfinding engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PathfindingConfig {
    /// Pause after each traversal step, in milliseconds.
    #[validate(range(max = 60_000))]
    #[serde(default = "default_path_delay_ms")]
    pub step_delay_ms: u64,
    /// Grid rows.
    #[validate(range(min = 1, max = 64))]
    #[serde(default = "default_grid_side")]
    pub rows: usize,
    /// Grid columns.
    #[validate(range(min = 1, max = 64))]
    #[serde(default = "default_grid_side")]
    pub cols: usize,
}

const fn default_path_delay_ms() -> u64 {
    80
}

const fn default_grid_side() -> usize {
    10
}

impl PathfindingConfig {
    /// Step delay as a duration.
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_path_delay_ms(),
            rows: default_grid_side(),
            cols: default_grid_side(),
        }
    }
}

/// Log retention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Maximum retained lines; absent means unbounded.
    #[serde(default)]
    pub capacity: Option<usize>,
}

/// Random input generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Seed for reproducible inputs.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of values.
    #[validate(range(min = 1, max = 512))]
    #[serde(default = "default_length")]
    pub length: usize,
    /// Smallest value.
    #[serde(default = "default_min_value")]
    pub min_value: i32,
    /// Largest value.
    #[serde(default = "default_max_value")]
    pub max_value: i32,
}

const fn default_seed() -> u64 {
    42
}

const fn default_length() -> usize {
    12
}

const fn default_min_value() -> i32 {
    1
}

const fn default_max_value() -> i32 {
    99
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            length: default_length(),
            min_value: default_min_value(),
            max_value: default_max_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = VizConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.sorting.step_delay(), Duration::from_millis(500));
        assert_eq!(config.pathfinding.step_delay(), Duration::from_millis(80));
        assert_eq!((config.pathfinding.rows, config.pathfinding.cols), (10, 10));
        assert_eq!(config.log.capacity, None);
        assert!(config.guard.enabled);
    }

    #[test]
    fn test_config_builder() {
        let config = VizConfig::builder()
            .sort_delay_ms(0)
            .path_delay_ms(5)
            .grid(4, 6)
            .log_capacity(100)
            .guard(false)
            .seed(7)
            .build();

        assert_eq!(config.sorting.step_delay_ms, 0);
        assert_eq!(config.pathfinding.step_delay_ms, 5);
        assert_eq!(config.pathfinding.rows, 4);
        assert_eq!(config.pathfinding.cols, 6);
        assert_eq!(config.log.capacity, Some(100));
        assert!(!config.guard.enabled);
        assert_eq!(config.input.seed, 7);
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
sorting:
  step_delay_ms: 250
pathfinding:
  rows: 12
  cols: 8
log:
  capacity: 500
";
        let config = VizConfig::from_yaml(yaml).expect("valid config");
        assert_eq!(config.sorting.step_delay_ms, 250);
        assert_eq!(config.pathfinding.rows, 12);
        assert_eq!(config.pathfinding.cols, 8);
        assert_eq!(config.pathfinding.step_delay_ms, 80);
        assert_eq!(config.log.capacity, Some(500));
    }

    #[test]
    fn test_config_empty_yaml_uses_defaults() {
        let config = VizConfig::from_yaml("{}").expect("valid config");
        assert_eq!(config, VizConfig::default());
    }

    #[test]
    fn test_config_rejects_unknown_field() {
        let result = VizConfig::from_yaml("sorting:\n  speed: 3\n");
        assert!(matches!(result, Err(VizError::YamlParse(_))));
    }

    #[test]
    fn test_config_rejects_grid_out_of_range() {
        let result = VizConfig::from_yaml("pathfinding:\n  rows: 0\n");
        assert!(matches!(result, Err(VizError::Validation(_))));

        let result = VizConfig::from_yaml("pathfinding:\n  cols: 65\n");
        assert!(matches!(result, Err(VizError::Validation(_))));
    }

    #[test]
    fn test_config_rejects_inverted_input_range() {
        let yaml = "input:\n  min_value: 50\n  max_value: 10\n";
        let err = VizConfig::from_yaml(yaml).expect_err("inverted range");
        assert!(err.to_string().contains("min_value"));
    }

    #[test]
    fn test_config_rejects_zero_log_capacity() {
        let err = VizConfig::from_yaml("log:\n  capacity: 0\n").expect_err("zero capacity");
        assert!(matches!(err, VizError::Config { .. }));
    }

    #[test]
    fn test_config_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viz.yaml");
        std::fs::write(&path, "sorting:\n  step_delay_ms: 10\n").expect("write");
        let config = VizConfig::load(&path).expect("load");
        assert_eq!(config.sorting.step_delay_ms, 10);
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = VizConfig::load("/nonexistent/algoviz.yaml");
        assert!(matches!(result, Err(VizError::Io(_))));
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = VizConfig::builder().grid(3, 5).build();
        let yaml = serde_yaml::to_string(&config).expect("serialize");
        let back = VizConfig::from_yaml(&yaml).expect("parse");
        assert_eq!(back, config);
    }
}
