//! Application configuration module
//!
//! Tunables for the threading engine: page sizes and the batch sizes used by
//! the bounded scan and delete loops.

use thiserror::Error;

/// Largest `max_page_size` a deployment may configure
pub const PAGE_SIZE_CEILING: u32 = 1000;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Page size used when a listing request has no `limit`
    pub default_page_size: u32,
    /// Upper bound applied to any requested `limit`
    pub max_page_size: u32,
    /// Raw rows fetched per round by the depth-filtered listing loop
    pub scan_batch_size: u32,
    /// Rows removed per round by cascade and like deletion
    pub delete_batch_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            scan_batch_size: 100,
            delete_batch_size: 100,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 || self.max_page_size > PAGE_SIZE_CEILING {
            return Err(ConfigError::InvalidValue(
                "max_page_size",
                format!("must be between 1 and {PAGE_SIZE_CEILING}"),
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidValue(
                "default_page_size",
                format!("must be between 1 and {}", self.max_page_size),
            ));
        }
        if self.scan_batch_size == 0 {
            return Err(ConfigError::InvalidValue("scan_batch_size", "must be at least 1".into()));
        }
        if self.delete_batch_size == 0 {
            return Err(ConfigError::InvalidValue("delete_batch_size", "must be at least 1".into()));
        }
        Ok(())
    }

    /// Resolve a client-supplied page size against the configured bounds
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    default_page_size: Option<u32>,
    max_page_size: Option<u32>,
    scan_batch_size: Option<u32>,
    delete_batch_size: Option<u32>,
}

impl AppConfigBuilder {
    pub fn default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = Some(size);
        self
    }

    pub fn max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = Some(size);
        self
    }

    pub fn scan_batch_size(mut self, size: u32) -> Self {
        self.scan_batch_size = Some(size);
        self
    }

    pub fn delete_batch_size(mut self, size: u32) -> Self {
        self.delete_batch_size = Some(size);
        self
    }

    /// Build the configuration, filling unset values with defaults
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            default_page_size: self.default_page_size.unwrap_or(defaults.default_page_size),
            max_page_size: self.max_page_size.unwrap_or(defaults.max_page_size),
            scan_batch_size: self.scan_batch_size.unwrap_or(defaults.scan_batch_size),
            delete_batch_size: self.delete_batch_size.unwrap_or(defaults.delete_batch_size),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_page_size_clamped() {
        let config = AppConfig::default();
        assert_eq!(config.page_size(None), 20);
        assert_eq!(config.page_size(Some(0)), 1);
        assert_eq!(config.page_size(Some(5_000)), 100);
    }

    #[test]
    fn test_builder_rejects_default_above_max() {
        let result = AppConfig::builder().max_page_size(10).default_page_size(50).build();
        assert!(matches!(result, Err(ConfigError::InvalidValue("default_page_size", _))));
    }

    #[test]
    fn test_max_page_size_is_bounded() {
        let result = AppConfig::builder().max_page_size(u32::MAX).build();
        assert!(matches!(result, Err(ConfigError::InvalidValue("max_page_size", _))));

        let result = AppConfig::builder().max_page_size(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidValue("max_page_size", _))));

        let config = AppConfig::builder().max_page_size(PAGE_SIZE_CEILING).build().unwrap();
        assert_eq!(config.page_size(Some(u32::MAX)), PAGE_SIZE_CEILING);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::builder().scan_batch_size(7).build().unwrap();
        assert_eq!(config.scan_batch_size, 7);
        assert_eq!(config.delete_batch_size, 100);
    }
}
