use anyhow::Result;
use soul_resolve::{Config, ResolutionService};

pub fn run_recommend(config: &Config, names: &[String]) -> Result<()> {
    let service = ResolutionService::open(config)?;
    let report = service.recommend(names)?;

    if report.is_empty() {
        println!("Nothing to report for {} package(s)", names.len());
        return Ok(());
    }

    if !report.replace.is_empty() {
        println!("Replace (parasitic pairings):");
        for advice in &report.replace {
            println!("  ✗ {} (score {:.4})", advice.name, advice.score);
            if advice.candidates.is_empty() {
                println!("      no replacement candidates found");
            }
            for candidate in &advice.candidates {
                println!(
                    "      candidate: {} ({:.4})",
                    candidate.namespace.key_for(&candidate.name),
                    candidate.score
                );
            }
        }
    }

    if !report.upgrade.is_empty() {
        println!("Upgrade (better alternative available):");
        for advice in &report.upgrade {
            println!(
                "  {} ({:.4}) -> {} ({:.4})",
                advice.name,
                advice.score,
                advice.best.namespace.key_for(&advice.best.name),
                advice.best.score
            );
        }
    }

    if !report.transmute.is_empty() {
        println!("Transmute (no counterpart pairing yet):");
        for name in &report.transmute {
            println!("  {name}");
        }
    }

    if !report.perfect.is_empty() {
        println!("Perfect:");
        for name in &report.perfect {
            println!("  ✓ {name}");
        }
    }

    Ok(())
}
