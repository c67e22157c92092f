//! Plugin catalog types
//!
//! In-memory records describing one installed plugin: its directory identity,
//! the optional declared metadata from `metadata.yaml`, and the chat commands
//! recovered from its source. Records live for a single request; every query
//! rebuilds them from disk.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::Result;

/// Declared metadata from a plugin's `metadata.yaml`.
///
/// All keys are optional and treated as opaque strings. The reader is
/// deliberately tolerant: scalar values of other YAML types are stringified,
/// non-scalar values are ignored, unknown keys are ignored. Only an invalid
/// YAML document is an error, and the scanner catches that per-plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Display name shown in listings instead of the directory name.
    #[serde(default)]
    pub name: Option<String>,

    /// One-line description.
    #[serde(default)]
    pub desc: Option<String>,

    /// Free-form help text.
    #[serde(default)]
    pub help: Option<String>,

    /// Version string.
    #[serde(default)]
    pub version: Option<String>,

    /// Author name or identifier.
    #[serde(default)]
    pub author: Option<String>,

    /// Repository URL.
    #[serde(default)]
    pub repo: Option<String>,
}

impl PluginMetadata {
    /// Parse a `metadata.yaml` document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Ok(Self {
            name: scalar(&value, "name"),
            desc: scalar(&value, "desc"),
            help: scalar(&value, "help"),
            version: scalar(&value, "version"),
            author: scalar(&value, "author"),
            repo: scalar(&value, "repo"),
        })
    }
}

/// Extract a key from a YAML mapping as an opaque string.
fn scalar(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One chat command recovered from a plugin's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Command name, always non-empty (unnamed commands are discarded
    /// during extraction).
    pub name: String,

    /// One-line description from the docstring's first line; possibly empty.
    pub description: String,

    /// Usage hint line, taken verbatim from the docstring; possibly empty.
    pub usage: String,
}

/// One installed plugin, rebuilt from disk on every scan.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    /// Directory name under the plugins root; unique within a scan.
    pub id: String,

    /// Declared metadata, `None` when `metadata.yaml` is absent or broken.
    pub metadata: Option<PluginMetadata>,

    /// Commands in source declaration order.
    pub commands: Vec<CommandInfo>,
}

impl PluginInfo {
    /// Display name: the declared metadata name when present and non-empty,
    /// otherwise the directory name.
    pub fn display_name(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }

    /// Declared description, if any.
    pub fn description(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.desc.as_deref())
    }

    /// Number of commands recovered from the plugin's source.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}
