//! Plugin directory scanner
//!
//! Walks the immediate subdirectories of the plugins root and builds a
//! `PluginInfo` per plugin. Every per-plugin failure is isolated: a missing
//! or malformed `metadata.yaml` leaves the plugin with empty metadata, an
//! unreadable `main.py` leaves it with zero commands, and only an unreadable
//! root aborts the scan (with an empty result, never an error).

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::extract::extract_commands;
use super::types::{CommandInfo, PluginInfo, PluginMetadata};

/// Metadata document looked for in each plugin directory.
const METADATA_FILE: &str = "metadata.yaml";

/// Main source file inspected for command definitions.
const MAIN_SOURCE_FILE: &str = "main.py";

/// Scan the plugins root for installed plugins.
///
/// Non-directory entries are skipped, as are directories whose name appears
/// in `exclude` (the summary plugin's own directory). Results are in
/// directory-listing order; no ordering is imposed or guaranteed.
pub fn scan_plugins(root: &Path, exclude: &[String]) -> Vec<PluginInfo> {
    let mut plugins = Vec::new();

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "Failed to read plugins root");
            return plugins;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "Failed to read directory entry, skipping");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let id = entry.file_name().to_string_lossy().to_string();
        if exclude.iter().any(|name| name == &id) {
            continue;
        }

        plugins.push(load_plugin(&path, id));
    }

    plugins
}

/// Load a single plugin from its directory.
///
/// Never fails: broken metadata or source degrade to empty fields.
pub fn load_plugin(dir: &Path, id: String) -> PluginInfo {
    let metadata = read_metadata(dir, &id);
    let commands = read_commands(dir, &id);
    debug!(
        plugin = %id,
        has_metadata = metadata.is_some(),
        commands = commands.len(),
        "Loaded plugin"
    );
    PluginInfo {
        id,
        metadata,
        commands,
    }
}

fn read_metadata(dir: &Path, id: &str) -> Option<PluginMetadata> {
    let path = dir.join(METADATA_FILE);
    if !path.exists() {
        return None;
    }

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            warn!(plugin = %id, error = %e, "Failed to read metadata, proceeding without");
            return None;
        }
    };

    match PluginMetadata::from_yaml(&text) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            warn!(plugin = %id, error = %e, "Malformed metadata, proceeding without");
            None
        }
    }
}

fn read_commands(dir: &Path, id: &str) -> Vec<CommandInfo> {
    let path = dir.join(MAIN_SOURCE_FILE);
    if !path.exists() {
        return Vec::new();
    }

    match fs::read_to_string(&path) {
        Ok(source) => extract_commands(&source),
        Err(e) => {
            warn!(plugin = %id, error = %e, "Failed to read plugin source, no commands");
            Vec::new()
        }
    }
}
