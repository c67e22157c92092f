//! Configuration for Plugindex
//!
//! Controls where the plugins root lives, which directory names are excluded
//! from scans (the summary plugin's own directory, by default), and which
//! font files the renderer tries before falling back to the built-in font.
//!
//! Configuration is optional: everything has a working default, and a broken
//! config file degrades to the defaults with a warning rather than refusing
//! to start.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Directory name of this plugin itself, excluded from every scan.
pub const SELF_DIR_NAME: &str = "plugindex";

/// Plugindex configuration, typically stored as `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Root directory containing one subdirectory per installed plugin.
    pub plugins_dir: PathBuf,

    /// Directory names skipped during scans. Always contains the summary
    /// plugin's own directory name by default.
    pub exclude: Vec<String>,

    /// Ordered font candidates for image rendering. Bare file names are
    /// searched under the platform font directories; paths are used as-is.
    pub font_candidates: Vec<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            plugins_dir: default_plugins_dir(),
            exclude: vec![SELF_DIR_NAME.to_string()],
            font_candidates: default_font_candidates(),
        }
    }
}

impl SummaryConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SummaryConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file, falling back to defaults when the
    /// path is absent or the file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::load(path) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        config = %path.display(),
                        error = %e,
                        "Failed to load config, using defaults"
                    );
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

/// Returns the default plugins root (`~/.plugindex/plugins`).
fn default_plugins_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".plugindex")
        .join("plugins")
}

/// Returns the default font candidates, CJK-capable fonts first.
fn default_font_candidates() -> Vec<String> {
    vec!["msyh.ttc".to_string(), "simhei.ttf".to_string()]
}
