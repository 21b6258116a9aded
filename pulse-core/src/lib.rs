//! Pulse Core
//!
//! This crate provides the core scheduling engine for the Pulse animation
//! runtime. It implements:
//!
//! - A bipartite dependency graph between mappers and shared value cells
//! - Topological ordering of mappers with cycle detection
//! - A frame-driven registry that lazily rebuilds the execution order and
//!   runs dirty mappers once per animation tick
//!
//! A *mapper* is a reactive computation registered by the host: it reads a
//! declared set of shared value cells and writes another set. When several
//! mappers form a chain (A writes X, B reads X and writes Y, C reads Y),
//! the registry guarantees they execute in dependency order within a single
//! frame.
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `graph`: node identity model, dependency graph construction, and the
//!   topological scheduler (a Kahn's-algorithm variant over the bipartite
//!   mapper/value graph)
//! - `mapper`: the mapper primitive, its externally-owned dirty flag, and
//!   the [`MapperRegistry`] orchestrator driven once per frame by the host
//!
//! # Threading
//!
//! The scheduler is single-threaded and cooperative: registration and
//! execution are expected to happen on one dedicated animation thread, and
//! every entry point takes `&mut self`, so the host's serialization
//! obligation is enforced by the borrow checker. [`DirtyFlag`] is the one
//! shared handle; it is atomic only so the external value store can hold an
//! independent clone of it.
//!
//! # Example
//!
//! ```rust
//! use pulse_core::{CellId, DirtyFlag, Mapper, MapperId, MapperRegistry};
//!
//! let v1 = CellId::next();
//! let dirty = DirtyFlag::new(true);
//!
//! let mut registry: MapperRegistry<Vec<u64>> = MapperRegistry::new();
//! registry.start_mapper(Mapper::new(
//!     MapperId::from(1),
//!     &[],
//!     &[v1],
//!     dirty.clone(),
//!     |log: &mut Vec<u64>| log.push(1),
//! ));
//!
//! let mut log = Vec::new();
//! registry.execute(&mut log).unwrap();
//! assert_eq!(log, vec![1]);
//! ```

pub mod error;
pub mod graph;
pub mod mapper;

pub use error::GraphError;
pub use graph::{CellId, DependencyGraph, MapperId, NodeKey, TopologicalScheduler};
pub use mapper::{DirtyFlag, Mapper, MapperRegistry};
