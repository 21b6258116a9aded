//! Mapper Registry
//!
//! The registry is the orchestrator: it owns the live mapper set and a
//! cached execution order, and is driven once per animation frame by the
//! host's frame loop.
//!
//! # How It Works
//!
//! 1. `start_mapper` / `stop_mapper` mutate the live set and mark the
//!    registry stale. No graph work happens at registration time.
//!
//! 2. At the top of each `execute` call, a stale registry rebuilds the
//!    execution order from scratch via the topological scheduler. A cyclic
//!    graph fails the rebuild, propagates to the caller, and leaves the
//!    registry stale — no mappers run that frame, and every later frame
//!    re-fails until the offending mappers are stopped.
//!
//! 3. With a valid order, `execute` walks it and invokes each mapper whose
//!    dirty flag reads true at its turn. Because upstream mappers run
//!    first and the value store flags downstream consumers synchronously
//!    on write, flags set mid-frame are observed in the same pass.
//!
//! # Ownership
//!
//! The registry is an explicitly-owned object, not a global: whatever owns
//! the frame loop owns the registry and passes it by reference. The
//! single-threaded precondition from the crate docs applies; every entry
//! point takes `&mut self`.

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::mapper::Mapper;
use crate::error::GraphError;
use crate::graph::{DependencyGraph, MapperId, TopologicalScheduler};

/// Owns the live mappers and drives their per-frame execution.
pub struct MapperRegistry<C> {
    /// Live mappers keyed by id. Insertion-ordered so rebuilds see a
    /// reproducible mapper sequence.
    mappers: IndexMap<MapperId, Mapper<C>>,

    /// Cached execution order, valid while `stale` is false.
    order: Vec<MapperId>,

    /// True when the mapper set changed since the order was computed.
    stale: bool,
}

impl<C> MapperRegistry<C> {
    /// Create an empty registry with a valid (empty) order.
    pub fn new() -> Self {
        Self {
            mappers: IndexMap::new(),
            order: Vec::new(),
            stale: false,
        }
    }

    /// Register a mapper and mark the cached order stale.
    ///
    /// A mapper with the same id as a live one replaces it. Rebuild is
    /// deferred to the next [`execute`](Self::execute).
    pub fn start_mapper(&mut self, mapper: Mapper<C>) {
        debug!(mapper = mapper.id().raw(), "start mapper");
        self.mappers.insert(mapper.id(), mapper);
        self.stale = true;
    }

    /// Remove a mapper and mark the cached order stale.
    ///
    /// Stopping an unknown id is a no-op, not an error: double-cleanup
    /// during teardown is a benign race in practice.
    pub fn stop_mapper(&mut self, id: MapperId) {
        debug!(mapper = id.raw(), "stop mapper");
        self.mappers.shift_remove(&id);
        self.stale = true;
    }

    /// Run one frame: rebuild the order if stale, then invoke every dirty
    /// mapper in dependency order.
    ///
    /// Dirty flags are read at each mapper's turn and are not cleared
    /// here; clearing belongs to the value-store collaborator. On
    /// [`GraphError::CycleDetected`] the registry stays stale and no
    /// mappers run this frame.
    pub fn execute(&mut self, ctx: &mut C) -> Result<(), GraphError> {
        if self.stale {
            self.order = self.rebuild()?;
            self.stale = false;
        }

        for i in 0..self.order.len() {
            let id = self.order[i];
            if let Some(mapper) = self.mappers.get_mut(&id) {
                if mapper.is_dirty() {
                    trace!(mapper = id.raw(), "invoking mapper");
                    mapper.invoke(ctx);
                }
            }
        }

        Ok(())
    }

    /// Check whether the cached order no longer reflects the live mapper
    /// set.
    ///
    /// The frame driver uses this as one signal (dirty flags are the
    /// other, tracked on the value-store side) to decide whether to
    /// request another animation tick.
    pub fn needs_run_on_render(&self) -> bool {
        self.stale
    }

    /// Number of live mappers.
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Check whether no mappers are registered.
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Check whether a mapper with the given id is live.
    pub fn contains(&self, id: MapperId) -> bool {
        self.mappers.contains_key(&id)
    }

    /// Derive a fresh graph from the live set and order it.
    fn rebuild(&self) -> Result<Vec<MapperId>, GraphError> {
        let graph = DependencyGraph::build(
            self.mappers
                .iter()
                .map(|(&id, mapper)| (id, mapper.inputs(), mapper.outputs())),
        );
        debug!(
            mappers = graph.mapper_count(),
            nodes = graph.node_count(),
            "rebuilding execution order"
        );
        TopologicalScheduler::new(graph).into_order()
    }
}

impl<C> Default for MapperRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
