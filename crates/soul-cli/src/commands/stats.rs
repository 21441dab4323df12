use anyhow::Result;
use soul_resolve::{Config, ResolutionService};

pub fn run_stats(config: &Config) -> Result<()> {
    let service = ResolutionService::open(config)?;
    let stats = service.stats()?;

    println!("\n📊 Soul Registry Status\n");
    println!("  Database: {}", config.database_path.display());
    println!(
        "  Records: {} ({} npm, {} crate)",
        stats.total_records, stats.npm_records, stats.crate_records
    );
    println!("  Verified: {}", stats.verified_records);
    println!("  Content index entries: {}", stats.indexed_souls);

    if stats.paired_records > 0 {
        println!(
            "  Paired: {} (average score {:.4})",
            stats.paired_records, stats.average_pairing_score
        );
    } else {
        println!("  Paired: 0");
    }

    if stats.total_records == 0 {
        println!("\n  Run `soulreg register` to add packages");
    }

    Ok(())
}
