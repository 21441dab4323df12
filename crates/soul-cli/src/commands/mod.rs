pub mod alternatives;
pub mod config;
pub mod graph;
pub mod purge;
pub mod recommend;
pub mod register;
pub mod resolve;
pub mod serve;
pub mod stats;
pub mod verify;

pub use alternatives::run_alternatives;
pub use graph::run_graph;
pub use purge::run_purge;
pub use recommend::run_recommend;
pub use register::run_register;
pub use resolve::run_resolve;
pub use serve::run_serve;
pub use stats::run_stats;
pub use verify::run_verify;
