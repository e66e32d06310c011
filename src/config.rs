//! Configuration types for input validation

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Length assumed by the indexing probe when the caller supplies none
pub const DEFAULT_PROBE_LENGTH: usize = 2;

/// Configuration for an `InputValidator`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Each example may carry several labels; skips single-label checks
    pub multi_label: bool,

    /// Do not require every class in `0..K-1` to be present
    pub allow_missing_classes: bool,

    /// Recognize `MapDataset` handles and accept them without indexing
    pub recognize_map_datasets: bool,

    /// Recognize `BatchedStream` handles and exempt them from size checks
    pub recognize_batched_streams: bool,

    /// Length assumed when probing indexing without a known length
    pub default_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            multi_label: false,
            allow_missing_classes: false,
            recognize_map_datasets: true,
            recognize_batched_streams: true,
            default_length: DEFAULT_PROBE_LENGTH,
        }
    }
}

impl ValidationConfig {
    /// Create a new configuration builder
    ///
    /// # Examples
    /// ```rust
    /// use labelcheck::ValidationConfig;
    ///
    /// # fn main() -> labelcheck::Result<()> {
    /// let config = ValidationConfig::builder()
    ///     .multi_label(true)
    ///     .recognize_batched_streams(false)
    ///     .build()?;
    /// assert!(config.multi_label);
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }

    /// Validate the configuration
    ///
    /// # Examples
    /// ```rust
    /// use labelcheck::ValidationConfig;
    ///
    /// let mut config = ValidationConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.default_length = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.default_length == 0 {
            return Err(ValidationError::invalid_config(format!(
                "default_length must be at least 1, got {}",
                self.default_length
            )));
        }
        Ok(())
    }

    /// Load a configuration from a JSON string; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for `ValidationConfig`
#[derive(Debug, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Start from an existing configuration
    pub fn from_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn multi_label(mut self, multi_label: bool) -> Self {
        self.config.multi_label = multi_label;
        self
    }

    #[must_use]
    pub fn allow_missing_classes(mut self, allow: bool) -> Self {
        self.config.allow_missing_classes = allow;
        self
    }

    #[must_use]
    pub fn recognize_map_datasets(mut self, recognize: bool) -> Self {
        self.config.recognize_map_datasets = recognize;
        self
    }

    #[must_use]
    pub fn recognize_batched_streams(mut self, recognize: bool) -> Self {
        self.config.recognize_batched_streams = recognize;
        self
    }

    #[must_use]
    pub fn default_length(mut self, length: usize) -> Self {
        self.config.default_length = length;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ValidationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(!config.multi_label);
        assert!(!config.allow_missing_classes);
        assert!(config.recognize_map_datasets);
        assert!(config.recognize_batched_streams);
        assert_eq!(config.default_length, DEFAULT_PROBE_LENGTH);
    }

    #[test]
    fn test_config_builder() {
        let config = ValidationConfig::builder()
            .multi_label(true)
            .allow_missing_classes(true)
            .recognize_map_datasets(false)
            .default_length(5)
            .build()
            .unwrap();

        assert!(config.multi_label);
        assert!(config.allow_missing_classes);
        assert!(!config.recognize_map_datasets);
        assert!(config.recognize_batched_streams);
        assert_eq!(config.default_length, 5);
    }

    #[test]
    fn test_config_validation() {
        let result = ValidationConfig::builder().default_length(0).build();
        let err = result.unwrap_err();
        assert!(matches!(err, ValidationError::InvalidConfig(_)));
        assert!(err.to_string().contains("default_length"));
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config = ValidationConfig::from_json(r#"{"multi_label": true}"#).unwrap();
        assert!(config.multi_label);
        assert!(config.recognize_batched_streams);
        assert_eq!(config.default_length, DEFAULT_PROBE_LENGTH);

        assert!(ValidationConfig::from_json(r#"{"default_length": 0}"#).is_err());
        assert!(ValidationConfig::from_json("not json").is_err());
    }
}
