//! Chart configuration
//!
//! Read from `~/.config/scrollchart/config.toml` (platform config dir) when
//! present. Every field has a default, so a missing file or a partial file is
//! fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animator::{
    AnimatorConfig, DEFAULT_TICK_INTERVAL, DEFAULT_TRANSITION, DEFAULT_VISIBLE_ROWS,
};
use crate::error::ConfigError;

/// Data file used when neither the CLI nor the config names one
pub const DEFAULT_CSV_PATH: &str = "./datafiles/Merged_Unemployment_Level_and_Rate.csv";

/// CSV header names for the two columns we read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub date: String,
    pub rate: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "yearAndMonth".to_string(),
            rate: "Unemployment Rate (in percentage)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub csv_path: PathBuf,
    pub visible_rows: usize,
    pub tick_interval_ms: u64,
    pub transition_ms: u64,
    /// Start playing as soon as the chart is shown
    pub autoplay: bool,
    pub columns: ColumnNames,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            visible_rows: DEFAULT_VISIBLE_ROWS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            transition_ms: DEFAULT_TRANSITION.as_millis() as u64,
            autoplay: false,
            columns: ColumnNames::default(),
        }
    }
}

impl ChartConfig {
    /// Platform default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scrollchart").join("config.toml"))
    }

    /// Load from `path`, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from the platform default location, or defaults if there is none
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> String {
        // Plain data with string keys always serializes
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn animator_config(&self) -> AnimatorConfig {
        AnimatorConfig {
            visible_rows: self.visible_rows,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            transition: Duration::from_millis(self.transition_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.visible_rows, 20);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.transition_ms, 100);
        assert!(!config.autoplay);
        assert_eq!(config.columns.date, "yearAndMonth");

        let animator = config.animator_config();
        assert_eq!(animator.tick_interval, Duration::from_secs(1));
        assert_eq!(animator.transition, Duration::from_millis(100));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChartConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ChartConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "visible_rows = 12\nautoplay = true\n\n[columns]\nrate = \"rate\""
        )
        .unwrap();

        let config = ChartConfig::load(file.path()).unwrap();
        assert_eq!(config.visible_rows, 12);
        assert!(config.autoplay);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.columns.rate, "rate");
        assert_eq!(config.columns.date, "yearAndMonth");
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "visible_rows = \"many\"").unwrap();
        assert!(matches!(
            ChartConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = ChartConfig {
            visible_rows: 8,
            ..ChartConfig::default()
        };
        let parsed: ChartConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }
}
