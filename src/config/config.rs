use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub view: ViewConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows per page
    pub page_size: usize,

    /// Column sorted ascending when a view is created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Placeholder for null or empty cells
    pub empty_cell: String,

    /// Labels for boolean cells on export
    pub true_label: String,
    pub false_label: String,

    /// Separator used when list cells are flattened to text
    pub list_separator: String,

    /// Markers shown next to the sorted column's header
    pub ascending_marker: String,
    pub descending_marker: String,

    /// Empty-state message when no rows match
    pub empty_title: String,
    pub empty_text: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            default_sort_column: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            empty_cell: "-".to_string(),
            true_label: "Yes".to_string(),
            false_label: "No".to_string(),
            list_separator: ", ".to_string(),
            ascending_marker: "↑".to_string(),
            descending_marker: "↓".to_string(),
            empty_title: "No data".to_string(),
            empty_text: "No rows match the current search or filters".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            debug!(target: "config", "No config at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(target: "config", "Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("tabview").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# tabview configuration file
# Location: ~/.config/tabview/config.toml (Linux)
#           ~/Library/Application Support/tabview/config.toml (macOS)
#           %APPDATA%\tabview\config.toml (Windows)

[view]
# Rows shown per page
page_size = 10

# Column sorted ascending when the view opens (leave commented for source order)
# default_sort_column = "name"

[display]
# Placeholder for null or empty cells
empty_cell = "-"

# Boolean labels used on export
true_label = "Yes"
false_label = "No"

# Separator for list values
list_separator = ", "

# Sort markers next to the sorted column header
ascending_marker = "↑"
descending_marker = "↓"

# Message shown when nothing matches
empty_title = "No data"
empty_text = "No rows match the current search or filters"
"#
        .to_string()
    }
}
