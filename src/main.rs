use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn, Instrument};

use inventix::app_system::{setup_tracing, InventixSystem};
use inventix::backend::HttpBackend;
use inventix::config::Settings;
use inventix::shell::Shell;

/// Sales terminal for the inventory backend.
#[derive(Debug, Parser)]
#[command(name = "inventix", version, about)]
struct Cli {
    /// Settings file (TOML). Defaults to ./inventix.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend address, overriding the settings file.
    #[arg(long)]
    base_url: Option<String>,

    /// Log filter used when RUST_LOG is unset, e.g. `debug`.
    #[arg(long)]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(base_url) = cli.base_url {
        settings.backend.base_url = base_url;
    }
    if let Some(filter) = cli.log {
        settings.log.filter = filter;
    }

    setup_tracing(&settings.log.filter);
    info!(base_url = %settings.backend.base_url, "Starting inventix");

    let backend = HttpBackend::new(&settings.backend).context("creating backend client")?;
    let system = InventixSystem::new(&settings, Arc::new(backend));

    let span = tracing::info_span!("catalog_load");
    match system.sale_client.load_catalog().instrument(span).await {
        Ok(summary) => info!(customers = summary.customers, products = summary.products, "Catalog ready"),
        Err(e) => warn!(error = %e, "Catalog not loaded"),
    }

    let shell = Shell::new(
        system.sale_client.clone(),
        system.registry.clone(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    shell.run().await.context("terminal i/o")?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Inventix stopped");
    Ok(())
}
