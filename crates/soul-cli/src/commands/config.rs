use anyhow::Result;
use soul_resolve::{config, Config};

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  database_path: {}", config.database_path.display());
    println!("  listen_addr: {}", config.listen_addr);
    println!("  dimension: {}", config.dimension);
    println!("  soul_suffix: {}", config.soul_suffix);
    println!("  cache_capacity: {}", config.cache_capacity);

    println!("\nPriority: CLI args > ENV vars (SOUL_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Initialize the config file with commented defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure the registry.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
