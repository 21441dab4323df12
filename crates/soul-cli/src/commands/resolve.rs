use anyhow::Result;
use soul_core::model::Resolution;
use soul_resolve::{Config, ResolutionService};

pub fn run_resolve(config: &Config, name: &str) -> Result<()> {
    let service = ResolutionService::open(config)?;

    match service.resolve(name)? {
        Resolution::Found(resolved) => {
            let record = &resolved.record;
            let verified = if record.verified { " [verified]" } else { "" };
            println!("✓ {} @ {}{verified}", record.key(), record.version);

            match &resolved.mapping {
                Some(mapping) => {
                    println!(
                        "  Pairs with {} @ {} (score {:.4})",
                        mapping.counterpart.key(),
                        mapping.counterpart.version,
                        mapping.score
                    );
                }
                None => println!("  No counterpart pairing yet"),
            }
        }
        Resolution::NotFound { name } => {
            println!("✗ {name}: no record in any namespace");
            println!("\nRun `soulreg register` to add it");
        }
    }

    Ok(())
}
