use anyhow::{Context, Result};
use soul_core::model::{FeatureVector, Namespace, TopologyMetrics};
use soul_resolve::{Config, ResolutionService};

pub fn run_register(
    config: &Config,
    name: &str,
    namespace: &str,
    version: &str,
    features: Vec<f64>,
    topology: TopologyMetrics,
) -> Result<()> {
    let namespace: Namespace = namespace.parse()?;
    let service = ResolutionService::open(config)?;

    let record = service
        .register(
            name,
            namespace,
            version,
            FeatureVector::new(features),
            topology,
        )
        .with_context(|| format!("Failed to register {}", namespace.key_for(name)))?;

    println!("✓ Registered {} @ {}", record.key(), record.version);
    println!("  Content index: {}", record.soul_key());

    Ok(())
}
