use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use plugindex::error::PlugindexError;
use plugindex::service::{Outbound, CMD_CATALOGUE, CMD_DETAIL, CMD_LIST, CMD_REFRESH};
use plugindex::{SummaryConfig, SummaryService};

#[derive(Parser)]
#[command(name = "plugindex")]
#[command(about = "Summarize the plugins installed next to this one", long_about = None)]
struct Cli {
    /// Plugins root directory (overrides config)
    #[arg(long, global = true)]
    plugins_dir: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Save the rendered PNG here; without it output is plain text
    #[arg(long, global = true)]
    png: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed plugins
    List,
    /// Show details for one plugin by name or 1-based index
    Detail { query: String },
    /// Show every command across all plugins
    Commands,
    /// Rescan the plugins directory and confirm
    Refresh,
    /// Show version information
    Version,
}

/// Console delivery: prints text, copies the transient PNG to `--png`.
struct ConsoleOutbound {
    png: Option<PathBuf>,
}

#[async_trait]
impl Outbound for ConsoleOutbound {
    async fn send_text(&self, text: &str) -> plugindex::Result<()> {
        println!("{}", text);
        Ok(())
    }

    async fn send_image(&self, path: &Path) -> plugindex::Result<()> {
        let target = self
            .png
            .as_ref()
            .ok_or_else(|| PlugindexError::Delivery("no image output path".to_string()))?;
        // The source is a temp artifact the service deletes after this call.
        std::fs::copy(path, target)?;
        println!("saved image to {}", target.display());
        Ok(())
    }

    fn supports_images(&self) -> bool {
        self.png.is_some()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = SummaryConfig::load_or_default(cli.config.as_deref());
    if let Some(plugins_dir) = cli.plugins_dir {
        config.plugins_dir = plugins_dir;
    }

    let service = SummaryService::new(config);
    let out = ConsoleOutbound { png: cli.png };

    let trigger = match cli.command {
        Some(Commands::Version) | None => {
            println!("plugindex {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(Commands::List) => CMD_LIST.to_string(),
        Some(Commands::Detail { query }) => format!("{} {}", CMD_DETAIL, query),
        Some(Commands::Commands) => CMD_CATALOGUE.to_string(),
        Some(Commands::Refresh) => CMD_REFRESH.to_string(),
    };

    service.handle(&trigger, &out).await?;
    Ok(())
}
