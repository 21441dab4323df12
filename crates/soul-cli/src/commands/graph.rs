use anyhow::Result;
use soul_resolve::{Config, ResolutionService};

pub fn run_graph(config: &Config, root: &str, dependencies: &[String]) -> Result<()> {
    let service = ResolutionService::open(config)?;
    let graph = service.build_graph(root, dependencies)?;

    println!("Dependency graph for {root}:\n");
    for node in &graph.nodes {
        let mut flags = Vec::new();
        if !node.resolved {
            flags.push("unresolved");
        }
        if node.parasitic {
            flags.push("parasitic");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!("  {:.4}  {}{flags}", node.similarity, node.name);
    }

    println!(
        "\n{} node(s), {} edge(s), average coherence {:.4}",
        graph.stats.node_count, graph.stats.edge_count, graph.stats.average_coherence
    );

    Ok(())
}
