use anyhow::Result;
use soul_resolve::{Config, ResolutionService};

pub fn run_alternatives(config: &Config, name: &str, threshold: f64) -> Result<()> {
    let service = ResolutionService::open(config)?;
    let alternatives = service.find_alternatives(name, threshold)?;

    if alternatives.is_empty() {
        println!("No alternatives for {name} at threshold {threshold}");
        return Ok(());
    }

    println!(
        "Found {} alternative(s) for {name} (threshold {threshold}):\n",
        alternatives.len()
    );
    for mapping in &alternatives {
        let verified = if mapping.counterpart.verified {
            " [verified]"
        } else {
            ""
        };
        println!(
            "  {:.4}  {} @ {}{verified}",
            mapping.score,
            mapping.counterpart.key(),
            mapping.counterpart.version
        );
    }

    Ok(())
}
