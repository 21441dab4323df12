use std::sync::Arc;

use anyhow::{Context, Result};
use soul_resolve::{Config, ResolutionService};

pub async fn run_serve(config: Config, listen: Option<String>) -> Result<()> {
    let addr = listen.unwrap_or_else(|| config.listen_addr.clone());
    let service = Arc::new(ResolutionService::open(&config)?);

    log::info!(
        "serving registry {} on {addr}",
        config.database_path.display()
    );
    println!("Soul registry API on http://{addr}");
    println!("Press Ctrl-C to stop");

    soul_server::serve(&addr, service)
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
