//! Device Catalog - command-line front end
//!
//! Prints the grouped device catalog, a single device's details, or a
//! device's download link.

use anyhow::Result;
use clap::{Parser, Subcommand};

use device_catalog::commands::{self, OutputFormat};
use device_catalog::{config, logging, CatalogConfig, DeviceCatalog};
use device_catalog::{log_debug, log_info};

#[derive(Debug, Parser)]
#[command(name = "device-catalog", version, about)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every device, grouped by manufacturer
    List,
    /// Show one device with its notes
    Show {
        /// Device identifier (remote directory name)
        id: String,
    },
    /// Print a device's download link
    Url {
        /// Device identifier (remote directory name)
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init();
    if cli.debug {
        logging::set_log_level(true);
    }

    log_info!("main", "=== Device Catalog {} ===", env!("CARGO_PKG_VERSION"));

    let catalog_config = CatalogConfig::from_env();
    log_debug!("main", "Config: {:?}", catalog_config);
    if catalog_config.access_token.is_none() {
        log_debug!(
            "main",
            "No access token set ({}); using unauthenticated requests",
            config::env::TOKEN
        );
    }

    let catalog = DeviceCatalog::new(catalog_config)?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let output = match cli.command {
        Command::List => commands::list_devices(&catalog, format).await?,
        Command::Show { id } => commands::show_device(&catalog, &id, format).await?,
        Command::Url { id } => commands::device_link(&catalog, &id),
    };

    println!("{}", output.trim_end());
    Ok(())
}
