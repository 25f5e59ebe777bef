//! tailwatch - binary entry point. All logic lives in the library crates.

use clap::Parser;
use tailwatch::Args;
use tracing::{error, info};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;

    // Log to file; the TUI owns the terminal and headless owns stdout
    tailwatch_core::logging::init()?;

    let settings = args.settings();
    info!(
        "Log source: {:?} (prefix {:?})",
        settings.source.log_path, settings.source.log_filename_prefix
    );

    let result = if args.headless {
        tailwatch::run_headless(settings).await
    } else {
        tailwatch::run_tui(settings).await
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("tailwatch exiting");
    Ok(result?)
}
