//! Node Identity
//!
//! This module defines the identities that address nodes in the dependency
//! graph: cell ids for shared values, mapper ids for registered mappers,
//! and the [`NodeKey`] sum type that places both kinds in a single totally
//! ordered node space.

use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity of a shared value cell.
///
/// The scheduler never reads or writes the cell's contents; it only uses
/// the id as a graph-node key. Ids are minted by the value store, either
/// through [`CellId::next`] or from an existing handle via `From<u64>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(u64);

impl CellId {
    /// Mint a new unique cell ID.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CellId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identity of a registered mapper.
///
/// Assigned by the caller at registration time and stable for the mapper's
/// lifetime. The registry does not generate ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MapperId(u64);

impl MapperId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for MapperId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A node in the bipartite dependency graph: either a value cell or a
/// mapper.
///
/// The derived ordering is kind-first (all value nodes before all mapper
/// nodes), then by handle identity within a kind. The topological
/// scheduler relies on this being a strict total order so nodes can live
/// in an ordered set keyed by `(in-degree, NodeKey)` pairs; the specific
/// kind-ordering choice is arbitrary but must stay fixed because it is the
/// deterministic tie-break between ready nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKey {
    /// A shared value cell referenced as an input or output.
    Value(CellId),
    /// A live mapper.
    Mapper(MapperId),
}
