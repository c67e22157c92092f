//! Plugin catalog for Plugindex
//!
//! This module rebuilds, on every query, an in-memory picture of the plugins
//! installed next to this one: which directories exist, what each plugin
//! declares about itself, and which chat commands its source registers.
//!
//! # Architecture
//!
//! - **types**: Core records (`PluginInfo`, `PluginMetadata`, `CommandInfo`)
//! - **scanner**: Directory scan and per-plugin loading with isolated failures
//! - **extract**: Structural command extraction from plugin source text
//!
//! # Scanned Directory Structure
//!
//! ```text
//! ~/.plugindex/plugins/
//! ├── anime_helper/
//! │   ├── metadata.yaml
//! │   └── main.py
//! ├── daily_news/
//! │   └── main.py
//! └── plugindex/          <- this plugin, excluded from scans
//! ```

mod extract;
mod scanner;
pub mod types;

pub use extract::extract_commands;
pub use scanner::{load_plugin, scan_plugins};
pub use types::{CommandInfo, PluginInfo, PluginMetadata};
