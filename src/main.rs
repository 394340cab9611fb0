//! comppy - Stateless iPhone price-comparison CLI
//!
//! A Rust implementation of the COMPPY price board with a triple-fallback
//! catalog transport and an LLM-sourced live dollar quote.

use anyhow::Result;
use clap::{Parser, Subcommand};
use comppy::commands::{QuoteCommand, StoresCommand, SyncCommand};
use comppy::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "comppy",
    version,
    about = "Stateless iPhone price-comparison CLI",
    long_about = "Fetches the COMPPY smartphone price catalog through a chain of CORS-bypass transports, enriches every listing locally, and displays a live USD/BRL quote."
)]
struct Cli {
    /// Catalog endpoint URL
    #[arg(long, global = true, env = "COMPPY_API_URL")]
    api_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "COMPPY_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and the live quote, then render both
    #[command(alias = "s")]
    Sync {
        /// Only show listings from this store
        #[arg(long)]
        store: Option<String>,

        /// Free-text filter over title and store name
        #[arg(short, long)]
        query: Option<String>,

        /// Skip the live USD/BRL probe
        #[arg(long)]
        no_quote: bool,
    },

    /// List the stores present in the catalog
    Stores,

    /// Fetch only the live USD/BRL quote
    #[command(alias = "q")]
    Quote,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Sync { store, query, no_quote } => {
            let cmd = SyncCommand::new(config).with_filters(store, query).skip_quote(no_quote);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Stores => {
            let cmd = StoresCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Quote => {
            let cmd = QuoteCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }
    }

    Ok(())
}
