//! Dependency Graph
//!
//! This module implements the bipartite dependency graph that connects
//! mappers to the shared value cells they read and write.
//!
//! # Overview
//!
//! The graph has two disjoint node kinds:
//!
//! - Value nodes, one per distinct cell referenced by any live mapper
//! - Mapper nodes, one per live mapper
//!
//! Edges run value -> mapper for each declared input, and mapper -> value
//! for each declared output. A topological ordering of this graph yields a
//! valid execution order for the mappers: every producer runs before any
//! mapper that consumes one of its outputs.
//!
//! # Design Decisions
//!
//! 1. The graph is ephemeral: it is rebuilt from scratch from the live
//!    mapper table whenever the set of mappers changes, and discarded after
//!    producing the linear order. This avoids long-lived cross-pointers
//!    between mappers and cells and the lifetime bugs that come with them.
//!
//! 2. Value nodes are bookkeeping only. They never appear in the output
//!    order; only mappers are scheduled.
//!
//! 3. Node identity is a sum type ordered first by kind, then by handle,
//!    so the whole node space fits in one ordered set keyed by
//!    `(in-degree, node)` pairs.

mod node;
mod scheduler;

pub use node::{CellId, MapperId, NodeKey};
pub use scheduler::{DependencyGraph, TopologicalScheduler};
