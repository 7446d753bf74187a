use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage file; `--db` takes precedence
    #[serde(default)]
    pub db: Option<PathBuf>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex overrides for theme slots, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-tag hex colors
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub show_clock: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            colors: HashMap::new(),
            tag_colors: HashMap::new(),
            show_clock: true,
        }
    }
}

fn default_true() -> bool {
    true
}
