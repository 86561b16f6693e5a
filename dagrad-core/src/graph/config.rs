// src/graph/config.rs

/// Options for a single backward pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackwardOptions {
    /// When `false`, each seeded root's stored gradient is replaced by the
    /// total it receives in this pass. When `true`, that total is added to
    /// the stored gradient instead. Every non-root node always accumulates.
    pub accumulate: bool,
}

/// Which nodes the bulk [`Graph::backward`](crate::graph::Graph::backward) seeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootSelection {
    /// Every node that requires grad and has no consumer in the graph.
    #[default]
    Terminal,
    /// Only nodes registered with [`Graph::add_node`](crate::graph::Graph::add_node).
    Designated,
}

/// Configuration of a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphConfig {
    pub roots: RootSelection,
    pub backward: BackwardOptions,
}
