//! Selection limits for the recommendation wrappers.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Look-alike references returned
    pub celebrity_limit: usize,
    /// Matched tags shown per look-alike
    pub presentable_tag_limit: usize,
    /// Lines per advice list
    pub advice_limit: usize,
    pub hairstyle_limit: usize,
    pub international_limit: usize,
    /// Outfit picks after scene selection and padding
    pub occasion_count: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            celebrity_limit: 8,
            presentable_tag_limit: 3,
            advice_limit: 4,
            hairstyle_limit: 3,
            international_limit: 3,
            occasion_count: 3,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AnalyzerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("celebrity_limit", self.celebrity_limit),
            ("presentable_tag_limit", self.presentable_tag_limit),
            ("advice_limit", self.advice_limit),
            ("hairstyle_limit", self.hairstyle_limit),
            ("international_limit", self.international_limit),
            ("occasion_count", self.occasion_count),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.celebrity_limit, 8);
        assert_eq!(config.occasion_count, 3);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AnalyzerConfig::from_toml("advice_limit = 6\n").unwrap();
        assert_eq!(config.advice_limit, 6);
        assert_eq!(config.hairstyle_limit, 3);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = AnalyzerConfig::from_toml("celebrity_limit = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(msg) if msg.contains("celebrity_limit")));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AnalyzerConfig::from_toml("advice_limit = \"many\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
