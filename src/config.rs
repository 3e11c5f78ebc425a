//! Converter configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Tunables for a [`crate::LocationConverter`].
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct ConverterConfig {
    /// Batch containment-check cadence: with N > 1 only every Nth element
    /// is tested against the boundary and the ones in between reuse the
    /// previous outcome. 0 or 1 tests every element.
    #[serde(default)]
    pub check_frequency: u32,
}

impl ConverterConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: ConverterConfig =
            toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_checks_every_point() {
        assert_eq!(ConverterConfig::default().check_frequency, 0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "check_frequency = 3").unwrap();
        let config = ConverterConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.check_frequency, 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ConverterConfig::load_from_file("/nonexistent/meridian.toml").is_err());
    }
}
