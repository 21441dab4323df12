use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use soul_core::model::TopologyMetrics;
use soul_resolve::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "soulreg", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the registry database (default: ~/.local/share/soul-registry/registry.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Register a package from pre-extracted features
    ///
    /// Stores one package record under its namespace key (npm:<name> or
    /// crate:<name>) plus a soul:<phash> content-index entry derived from
    /// the feature vector. The vector comes from an external feature
    /// extractor and must match the registry's configured dimension
    /// exactly; registration rejects any other length.
    ///
    /// Re-registering the same name and version is an error. A different
    /// version replaces the record wholesale: fresh creation time, the
    /// verified flag cleared, and the old content-index entry dropped.
    ///
    /// Example:
    ///   soulreg register left-pad --namespace npm --version 1.3.0 \
    ///     --features 1,2,3,4,5,6,7 --euler 4 --clustering 0.5 --modularity 0.3
    Register {
        /// Bare package name, unique within its namespace
        name: String,
        /// Registry namespace: npm or crate
        #[arg(long)]
        namespace: String,
        /// Semantic version string, stored verbatim
        #[arg(long)]
        version: String,
        /// Feature vector components, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        features: Vec<f64>,
        /// Euler characteristic of the package's structure graph
        #[arg(long, default_value_t = 0)]
        euler: i64,
        /// Average clustering coefficient
        #[arg(long, default_value_t = 0.0)]
        clustering: f64,
        /// Community modularity score
        #[arg(long, default_value_t = 0.0)]
        modularity: f64,
    },
    /// Resolve a package name to its cross-registry pairing
    Resolve {
        /// Package name, with or without the soul suffix
        name: String,
    },
    /// List stored packages similar to a named package
    Alternatives {
        /// Package name to find alternatives for
        name: String,
        /// Minimum similarity score to keep
        #[arg(long, default_value_t = 0.8)]
        threshold: f64,
    },
    /// Verify the cross-registry pairing between two packages
    Verify {
        /// One side of the pairing
        name_a: String,
        /// The other side
        name_b: String,
    },
    /// Classify a dependency list into recommendation buckets
    Recommend {
        /// Package names to classify
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Build a classified dependency graph for a root package
    Graph {
        /// Root package name
        root: String,
        /// Dependency package names
        dependencies: Vec<String>,
    },
    /// Show registry-wide statistics
    Stats,
    /// Remove a package record and its content-index entry
    Purge {
        /// Package name to remove
        name: String,
        /// Registry namespace: npm or crate
        #[arg(long)]
        namespace: String,
    },
    /// Run the HTTP query surface
    Serve {
        /// Listen address, e.g. 0.0.0.0:7432 (default from config)
        #[arg(long)]
        listen: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommands {
    /// Create the config file with commented defaults
    Init,
    /// Show the current effective configuration
    Show,
    /// Show the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.db {
        Some(db) => Config::load_with_db_path(db)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Register {
            name,
            namespace,
            version,
            features,
            euler,
            clustering,
            modularity,
        } => {
            let topology = TopologyMetrics::new(euler, clustering, modularity);
            commands::run_register(&config, &name, &namespace, &version, features, topology)?;
        }
        Commands::Resolve { name } => {
            commands::run_resolve(&config, &name)?;
        }
        Commands::Alternatives { name, threshold } => {
            commands::run_alternatives(&config, &name, threshold)?;
        }
        Commands::Verify { name_a, name_b } => {
            commands::run_verify(&config, &name_a, &name_b)?;
        }
        Commands::Recommend { names } => {
            commands::run_recommend(&config, &names)?;
        }
        Commands::Graph { root, dependencies } => {
            commands::run_graph(&config, &root, &dependencies)?;
        }
        Commands::Stats => {
            commands::run_stats(&config)?;
        }
        Commands::Purge { name, namespace } => {
            commands::run_purge(&config, &name, &namespace)?;
        }
        Commands::Serve { listen } => {
            commands::run_serve(config, listen).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Init => commands::config::init_config()?,
            ConfigCommands::Show => commands::config::show_config()?,
            ConfigCommands::Path => commands::config::show_path()?,
        },
    }

    Ok(())
}
