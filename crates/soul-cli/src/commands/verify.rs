use anyhow::Result;
use soul_resolve::{Config, ResolutionService};

pub fn run_verify(config: &Config, name_a: &str, name_b: &str) -> Result<()> {
    let service = ResolutionService::open(config)?;
    let result = service.verify(name_a, name_b)?;

    if result.verified {
        println!(
            "✓ Verified {name_a} <-> {name_b} (score {:.4})",
            result.score
        );
    } else {
        println!("✗ Not verified (score {:.4})", result.score);
        if let Some(reason) = &result.reason {
            println!("  {reason}");
        }
    }

    Ok(())
}
