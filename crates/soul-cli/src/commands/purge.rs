use anyhow::Result;
use soul_core::model::Namespace;
use soul_resolve::{Config, ResolutionService};

pub fn run_purge(config: &Config, name: &str, namespace: &str) -> Result<()> {
    let namespace: Namespace = namespace.parse()?;
    let service = ResolutionService::open(config)?;

    service.purge(name, namespace)?;
    println!("✓ Purged {}", namespace.key_for(name));

    Ok(())
}
