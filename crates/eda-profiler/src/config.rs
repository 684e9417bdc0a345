//! Configuration types for the profiling engine.
//!
//! The inference thresholds default to the values the profiler has always
//! used (0.8 numeric ratio, 10 distinct values, 10% cardinality ratio).
//! They are configurable, but changing them changes how columns are typed.

use serde::{Deserialize, Serialize};

/// Configuration for the profiling engine.
///
/// Use [`ProfilerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust
/// use eda_profiler::ProfilerConfig;
///
/// let config = ProfilerConfig::builder()
///     .max_histogram_bins(30)
///     .top_values_limit(5)
///     .build()
///     .unwrap();
/// assert_eq!(config.numeric_ratio_threshold, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// A column is numeric when the share of parseable values is strictly
    /// greater than this ratio.
    /// Default: 0.8
    pub numeric_ratio_threshold: f64,

    /// Non-numeric columns with at most this many distinct values are
    /// categorical, regardless of row count.
    /// Default: 10
    pub categorical_min_unique: usize,

    /// Non-numeric columns whose distinct count is at most this share of
    /// their non-missing values are categorical.
    /// Default: 0.1
    pub categorical_unique_ratio: f64,

    /// Upper bound on histogram bins.
    /// Default: 20
    pub max_histogram_bins: usize,

    /// Number of distinct row and column categories kept in a cross-tabulation.
    /// Default: 10
    pub crosstab_max_categories: usize,

    /// Number of most frequent values reported for non-numeric columns.
    /// Default: 10
    pub top_values_limit: usize,

    /// Number of rows in the head and tail samples.
    /// Default: 10
    pub sample_rows: usize,

    /// Strip currency symbols, percent signs, thousands separators and
    /// spaces before numeric parsing.
    /// Default: false
    pub strip_numeric_formatting: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            numeric_ratio_threshold: 0.8,
            categorical_min_unique: 10,
            categorical_unique_ratio: 0.1,
            max_histogram_bins: 20,
            crosstab_max_categories: 10,
            top_values_limit: 10,
            sample_rows: 10,
            strip_numeric_formatting: false,
        }
    }
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.numeric_ratio_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "numeric_ratio_threshold".to_string(),
                value: self.numeric_ratio_threshold,
            });
        }

        if !(0.0..=1.0).contains(&self.categorical_unique_ratio) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "categorical_unique_ratio".to_string(),
                value: self.categorical_unique_ratio,
            });
        }

        if self.max_histogram_bins == 0 {
            return Err(ConfigValidationError::ZeroLimit(
                "max_histogram_bins".to_string(),
            ));
        }

        if self.crosstab_max_categories == 0 {
            return Err(ConfigValidationError::ZeroLimit(
                "crosstab_max_categories".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid limit for '{0}': must be at least 1")]
    ZeroLimit(String),
}

impl From<ConfigValidationError> for crate::error::ProfilingError {
    fn from(e: ConfigValidationError) -> Self {
        crate::error::ProfilingError::InvalidConfig(e.to_string())
    }
}

/// Builder for [`ProfilerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    numeric_ratio_threshold: Option<f64>,
    categorical_min_unique: Option<usize>,
    categorical_unique_ratio: Option<f64>,
    max_histogram_bins: Option<usize>,
    crosstab_max_categories: Option<usize>,
    top_values_limit: Option<usize>,
    sample_rows: Option<usize>,
    strip_numeric_formatting: Option<bool>,
}

impl ProfilerConfigBuilder {
    /// Set the share of parseable values above which a column is numeric.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.8 = 80%)
    pub fn numeric_ratio_threshold(mut self, threshold: f64) -> Self {
        self.numeric_ratio_threshold = Some(threshold);
        self
    }

    /// Set the distinct-value floor for categorical columns.
    pub fn categorical_min_unique(mut self, count: usize) -> Self {
        self.categorical_min_unique = Some(count);
        self
    }

    /// Set the distinct-to-total ratio for categorical columns.
    ///
    /// # Arguments
    /// * `ratio` - Value between 0.0 and 1.0 (e.g., 0.1 = 10%)
    pub fn categorical_unique_ratio(mut self, ratio: f64) -> Self {
        self.categorical_unique_ratio = Some(ratio);
        self
    }

    /// Set the maximum number of histogram bins.
    pub fn max_histogram_bins(mut self, bins: usize) -> Self {
        self.max_histogram_bins = Some(bins);
        self
    }

    /// Set how many categories per axis a cross-tabulation keeps.
    pub fn crosstab_max_categories(mut self, max: usize) -> Self {
        self.crosstab_max_categories = Some(max);
        self
    }

    /// Set how many top values are reported for non-numeric columns.
    pub fn top_values_limit(mut self, limit: usize) -> Self {
        self.top_values_limit = Some(limit);
        self
    }

    /// Set the size of the head/tail row samples.
    pub fn sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = Some(rows);
        self
    }

    /// Enable or disable stripping of numeric formatting characters.
    pub fn strip_numeric_formatting(mut self, strip: bool) -> Self {
        self.strip_numeric_formatting = Some(strip);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfilerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let defaults = ProfilerConfig::default();
        let config = ProfilerConfig {
            numeric_ratio_threshold: self
                .numeric_ratio_threshold
                .unwrap_or(defaults.numeric_ratio_threshold),
            categorical_min_unique: self
                .categorical_min_unique
                .unwrap_or(defaults.categorical_min_unique),
            categorical_unique_ratio: self
                .categorical_unique_ratio
                .unwrap_or(defaults.categorical_unique_ratio),
            max_histogram_bins: self
                .max_histogram_bins
                .unwrap_or(defaults.max_histogram_bins),
            crosstab_max_categories: self
                .crosstab_max_categories
                .unwrap_or(defaults.crosstab_max_categories),
            top_values_limit: self.top_values_limit.unwrap_or(defaults.top_values_limit),
            sample_rows: self.sample_rows.unwrap_or(defaults.sample_rows),
            strip_numeric_formatting: self
                .strip_numeric_formatting
                .unwrap_or(defaults.strip_numeric_formatting),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProfilerConfig::default();
        assert_eq!(config.numeric_ratio_threshold, 0.8);
        assert_eq!(config.categorical_min_unique, 10);
        assert_eq!(config.categorical_unique_ratio, 0.1);
        assert_eq!(config.max_histogram_bins, 20);
        assert_eq!(config.crosstab_max_categories, 10);
        assert!(!config.strip_numeric_formatting);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = ProfilerConfig::builder().build().unwrap();
        assert_eq!(config, ProfilerConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ProfilerConfig::builder()
            .numeric_ratio_threshold(0.9)
            .categorical_min_unique(5)
            .max_histogram_bins(8)
            .strip_numeric_formatting(true)
            .build()
            .unwrap();

        assert_eq!(config.numeric_ratio_threshold, 0.9);
        assert_eq!(config.categorical_min_unique, 5);
        assert_eq!(config.max_histogram_bins, 8);
        assert!(config.strip_numeric_formatting);
        assert_eq!(config.top_values_limit, 10);
    }

    #[test]
    fn test_validation_invalid_ratio() {
        let result = ProfilerConfig::builder()
            .categorical_unique_ratio(1.5)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_zero_bins() {
        let result = ProfilerConfig::builder().max_histogram_bins(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ZeroLimit(field) if field == "max_histogram_bins"
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{ "numeric_ratio_threshold": 0.5, "sample_rows": 3 }"#;
        let config: ProfilerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.numeric_ratio_threshold, 0.5);
        assert_eq!(config.sample_rows, 3);
        assert_eq!(config.max_histogram_bins, 20);
    }
}
