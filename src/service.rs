//! Chat command surface for Plugindex
//!
//! `SummaryService` recognizes the four text triggers, rebuilds the plugin
//! catalog from disk for every one of them (no cache, so the reply always
//! reflects current directory contents), formats the requested view, and
//! delivers it through an `Outbound` sink — as a rendered PNG when the sink
//! accepts images, as plain text otherwise or when rendering fails.
//!
//! The host chat runtime owns message routing; it only needs to forward
//! trigger lines here and provide an `Outbound` implementation.

use async_trait::async_trait;
use std::path::Path;
use tracing::{info, warn};

use crate::catalog::{scan_plugins, PluginInfo};
use crate::config::SummaryConfig;
use crate::error::Result;
use crate::render;
use crate::summary;

/// Trigger: numbered plugin listing.
pub const CMD_LIST: &str = "plugin-list";

/// Trigger: single-plugin detail, takes a name or 1-based index.
pub const CMD_DETAIL: &str = "plugin-detail";

/// Trigger: full command catalogue across all plugins.
pub const CMD_CATALOGUE: &str = "all-commands";

/// Trigger: force a rescan and confirm.
pub const CMD_REFRESH: &str = "refresh-plugin-list";

/// Delivery sink provided by the host chat runtime.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Deliver a plain-text reply.
    async fn send_text(&self, text: &str) -> Result<()>;

    /// Deliver an image attachment. The file at `path` is only valid for the
    /// duration of this call; the service removes it afterward.
    async fn send_image(&self, path: &Path) -> Result<()>;

    /// Whether this sink can deliver images at all. Text-only sinks skip
    /// rendering entirely.
    fn supports_images(&self) -> bool {
        true
    }
}

/// Handles the plugin-summary chat commands.
pub struct SummaryService {
    config: SummaryConfig,
}

impl SummaryService {
    /// Create a service over the given configuration.
    pub fn new(config: SummaryConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Rebuild the plugin catalog from disk.
    pub fn scan(&self) -> Vec<PluginInfo> {
        scan_plugins(&self.config.plugins_dir, &self.config.exclude)
    }

    /// Handle one incoming message.
    ///
    /// Returns `Ok(true)` when the message matched a trigger and a reply was
    /// delivered, `Ok(false)` when the message is not for this service.
    pub async fn handle(&self, message: &str, out: &dyn Outbound) -> Result<bool> {
        let mut parts = message.trim().splitn(2, char::is_whitespace);
        let trigger = parts.next().unwrap_or("");
        let arg = parts.next().map(str::trim).unwrap_or("");

        let text = match trigger {
            CMD_LIST => summary::listing_view(&self.scan()),
            CMD_DETAIL => {
                if arg.is_empty() {
                    format!("请输入插件名称或序号，例如：{} 1", CMD_DETAIL)
                } else {
                    summary::detail_view(&self.scan(), arg)
                }
            }
            CMD_CATALOGUE => summary::catalogue_view(&self.scan()),
            CMD_REFRESH => {
                let plugins = self.scan();
                info!(plugins = plugins.len(), "Plugin list refreshed");
                "✅ 插件列表已刷新".to_string()
            }
            _ => return Ok(false),
        };

        self.deliver(&text, out).await?;
        Ok(true)
    }

    /// Deliver a formatted reply, preferring an image attachment.
    ///
    /// A render failure falls back to plain text. An image delivery failure
    /// propagates, but the temp artifact is removed either way.
    async fn deliver(&self, text: &str, out: &dyn Outbound) -> Result<()> {
        if out.supports_images() {
            match render::render_text(text, &self.config.font_candidates) {
                Ok(artifact) => {
                    // artifact drops (and deletes the file) whether or not
                    // the send succeeds
                    return out.send_image(artifact.path()).await;
                }
                Err(e) => {
                    warn!(error = %e, "Render failed, falling back to plain text");
                }
            }
        }
        out.send_text(text).await
    }
}
