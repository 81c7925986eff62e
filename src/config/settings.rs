//! Application and widget configuration

use anyhow::Result;
use rg_rows_core::IdStrategy;
use rg_rows_types::source_configs::WeekdayDatesConfig;
use rg_rows_types::{ConfigureRequest, ControlKind, SourceConfig, DEFAULT_ROW_COUNT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_source() -> SourceConfig {
    SourceConfig::WeekdayDates(WeekdayDatesConfig::default())
}

fn default_rows() -> u32 {
    DEFAULT_ROW_COUNT
}

fn default_timezone() -> String {
    "Local".to_string()
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Row source served by the provider, with its settings
    #[serde(default = "default_source")]
    pub source: SourceConfig,
    /// Fallback row count when neither widget tag nor source gives one
    #[serde(default = "default_rows")]
    pub default_rows: u32,
    /// Timezone ID used for "today" (e.g., "Europe/London", "Local")
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// How session ids are generated
    #[serde(default)]
    pub instance_ids: IdStrategy,
    /// Widgets opened at startup
    #[serde(default)]
    pub widgets: Vec<WidgetPreset>,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "github.hilgardt_collab", "rg-rows")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            source: default_source(),
            default_rows: DEFAULT_ROW_COUNT,
            timezone: default_timezone(),
            instance_ids: IdStrategy::default(),
            widgets: Vec::new(),
        }
    }
}

/// A widget opened at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPreset {
    /// Widget identity
    pub id: String,
    #[serde(default)]
    pub kind: ControlKind,
    /// Free-text tag; a number here seeds the widget's default row count
    #[serde(default)]
    pub tag: Option<String>,
    /// Reconfiguration applied right after the widget is opened
    #[serde(default)]
    pub configure: Option<ConfigureRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_widget_presets_deserialize() {
        let json = r#"{
            "source": {"source_type": "month_end", "include_current": true},
            "instance_ids": "random",
            "widgets": [
                {"id": "payday", "kind": "list", "tag": "6"},
                {"id": "due", "configure": {"row_count": 3, "display_format": "%d %b"}}
            ]
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.source.source_type(), "month_end");
        assert_eq!(config.instance_ids, IdStrategy::Random);
        assert_eq!(config.widgets.len(), 2);
        assert_eq!(config.widgets[0].kind, ControlKind::List);
        assert_eq!(config.widgets[1].kind, ControlKind::Combo);
        assert_eq!(
            config.widgets[1].configure.as_ref().unwrap().row_count,
            Some(3)
        );
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = std::env::temp_dir().join(format!("rg-rows-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.json");
        let mut config = AppConfig::default();
        config.default_rows = 4;
        config.widgets.push(WidgetPreset {
            id: "w1".to_string(),
            kind: ControlKind::List,
            tag: None,
            configure: None,
        });

        config.save_to_path(&path).unwrap();
        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }
}
