//! Topological Scheduler
//!
//! The scheduler computes a linear execution order of mappers from the
//! bipartite mapper/value graph, or fails if the dependency structure
//! contains a cycle.
//!
//! # Algorithm
//!
//! A variant of Kahn's algorithm over the combined node space:
//!
//! 1. Compute an in-degree per node. A mapper node's in-degree is the
//!    number of distinct cells it reads; a value node's in-degree is the
//!    number of distinct live mappers that write it. A cell nobody writes
//!    starts at zero: it has no producer inside the graph, so it is
//!    "already available" (set from outside the mapper system).
//! 2. Keep every node in an ordered set keyed by `(current in-degree,
//!    node)`. Entries are removed and reinserted when their degree
//!    changes, never mutated in place.
//! 3. Repeatedly extract the minimum entry. If its degree is nonzero,
//!    every remaining node has a positive degree and the loop stops.
//!    - Extracting a **mapper** appends it to the order and decrements
//!      each of its output value nodes (one producer satisfied).
//!    - Extracting a **value** decrements each mapper that reads it (one
//!      dependency satisfied). Value nodes are not emitted.
//! 4. If any node is left over, the graph is cyclic.
//!
//! Ties between ready nodes break on [`NodeKey`] order, so the result is
//! deterministic for a fixed mapper set regardless of registration order.
//!
//! Complexity is O((M + V + E) log(M + V)) for M mappers, V distinct
//! cells, and E input+output edges.

use std::collections::{BTreeSet, HashMap};

use smallvec::SmallVec;
use tracing::trace;

use super::node::{CellId, MapperId, NodeKey};
use crate::error::GraphError;

/// The bipartite dependency graph derived from the live mapper set.
///
/// This is an ephemeral structure: built fresh from the live-mapper table
/// on every stale rebuild, consumed by [`TopologicalScheduler`], and
/// discarded once the linear order exists.
pub struct DependencyGraph {
    /// Initial in-degree of every node in the combined node space.
    degrees: HashMap<NodeKey, usize>,

    /// For each cell, the mappers that declare it as an input.
    consumers: HashMap<CellId, Vec<MapperId>>,

    /// For each mapper, the cells it declares as outputs.
    outputs: HashMap<MapperId, SmallVec<[CellId; 4]>>,
}

impl DependencyGraph {
    /// Build the graph from the live mapper set.
    ///
    /// Each item is `(mapper id, input cells, output cells)`. The cell
    /// slices must be duplicate-free; [`Mapper::new`](crate::Mapper::new)
    /// enforces this at construction.
    pub fn build<'a, I>(mappers: I) -> Self
    where
        I: IntoIterator<Item = (MapperId, &'a [CellId], &'a [CellId])>,
    {
        let mut degrees = HashMap::new();
        let mut consumers: HashMap<CellId, Vec<MapperId>> = HashMap::new();
        let mut outputs = HashMap::new();

        for (id, inputs, outs) in mappers {
            degrees.insert(NodeKey::Mapper(id), inputs.len());

            for &cell in inputs {
                consumers.entry(cell).or_default().push(id);
                // Input-only cells still need a node, at in-degree zero.
                degrees.entry(NodeKey::Value(cell)).or_insert(0);
            }

            for &cell in outs {
                *degrees.entry(NodeKey::Value(cell)).or_insert(0) += 1;
            }

            outputs.insert(id, SmallVec::from_slice(outs));
        }

        Self {
            degrees,
            consumers,
            outputs,
        }
    }

    /// Total number of nodes (mappers plus distinct cells).
    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    /// Number of mapper nodes.
    pub fn mapper_count(&self) -> usize {
        self.outputs.len()
    }
}

/// Kahn's-algorithm scheduler over a [`DependencyGraph`].
pub struct TopologicalScheduler {
    /// Every not-yet-extracted node, keyed by `(current in-degree, node)`.
    pending: BTreeSet<(usize, NodeKey)>,

    /// Current in-degree per pending node, for locating entries in
    /// `pending` when they need to move.
    degrees: HashMap<NodeKey, usize>,

    consumers: HashMap<CellId, Vec<MapperId>>,
    outputs: HashMap<MapperId, SmallVec<[CellId; 4]>>,
}

impl TopologicalScheduler {
    /// Seed the scheduler with every node of the graph.
    pub fn new(graph: DependencyGraph) -> Self {
        let pending = graph
            .degrees
            .iter()
            .map(|(&key, &degree)| (degree, key))
            .collect();

        Self {
            pending,
            degrees: graph.degrees,
            consumers: graph.consumers,
            outputs: graph.outputs,
        }
    }

    /// Consume the graph and produce the mapper execution order.
    ///
    /// Returns [`GraphError::CycleDetected`] if any node never reaches
    /// in-degree zero. A mapper that reads and writes the same cell with
    /// no other producer forms a two-hop cycle through that cell and is
    /// caught here like any other.
    pub fn into_order(mut self) -> Result<Vec<MapperId>, GraphError> {
        let mut order = Vec::with_capacity(self.outputs.len());

        while let Some(&(degree, key)) = self.pending.first() {
            if degree > 0 {
                break;
            }
            self.pending.remove(&(degree, key));
            self.degrees.remove(&key);

            match key {
                NodeKey::Mapper(id) => {
                    trace!(mapper = id.raw(), "scheduled");
                    order.push(id);

                    // This mapper has run; each of its output cells has
                    // one fewer unsatisfied producer.
                    if let Some(outs) = self.outputs.remove(&id) {
                        for cell in outs {
                            self.decrement(NodeKey::Value(cell));
                        }
                    }
                }
                NodeKey::Value(cell) => {
                    // All producers of this cell have run; each consumer
                    // has one fewer unsatisfied input.
                    if let Some(readers) = self.consumers.remove(&cell) {
                        for id in readers {
                            self.decrement(NodeKey::Mapper(id));
                        }
                    }
                }
            }
        }

        if !self.pending.is_empty() {
            return Err(GraphError::CycleDetected);
        }

        Ok(order)
    }

    /// Move a node one step closer to ready: remove its `(degree, key)`
    /// entry and reinsert it at `degree - 1`.
    fn decrement(&mut self, key: NodeKey) {
        if let Some(degree) = self.degrees.get_mut(&key) {
            self.pending.remove(&(*degree, key));
            *degree = degree.saturating_sub(1);
            self.pending.insert((*degree, key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_of(mappers: &[(u64, &[u64], &[u64])]) -> Result<Vec<MapperId>, GraphError> {
        let owned: Vec<(MapperId, Vec<CellId>, Vec<CellId>)> = mappers
            .iter()
            .map(|&(id, inputs, outputs)| {
                (
                    MapperId::from(id),
                    inputs.iter().map(|&c| CellId::from(c)).collect(),
                    outputs.iter().map(|&c| CellId::from(c)).collect(),
                )
            })
            .collect();

        let graph = DependencyGraph::build(
            owned
                .iter()
                .map(|(id, inputs, outputs)| (*id, inputs.as_slice(), outputs.as_slice())),
        );
        TopologicalScheduler::new(graph).into_order()
    }

    #[test]
    fn chain_orders_producer_first() {
        // M1 writes V1, M2 reads V1 and writes V2.
        let order = order_of(&[(1, &[], &[10]), (2, &[10], &[11])]).unwrap();
        assert_eq!(order, vec![MapperId::from(1), MapperId::from(2)]);
    }

    #[test]
    fn order_ignores_registration_order() {
        let forward = order_of(&[(1, &[], &[10]), (2, &[10], &[11])]).unwrap();
        let reversed = order_of(&[(2, &[10], &[11]), (1, &[], &[10])]).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn three_mapper_chain() {
        let order = order_of(&[
            (3, &[11], &[12]),
            (1, &[], &[10]),
            (2, &[10], &[11]),
        ])
        .unwrap();
        assert_eq!(
            order,
            vec![MapperId::from(1), MapperId::from(2), MapperId::from(3)]
        );
    }

    #[test]
    fn two_mapper_cycle_detected() {
        // M1 reads V1 and writes V2; M2 reads V2 and writes V1.
        let err = order_of(&[(1, &[10], &[11]), (2, &[11], &[10])]).unwrap_err();
        assert_eq!(err, GraphError::CycleDetected);
    }

    #[test]
    fn three_mapper_cycle_detected() {
        let err = order_of(&[
            (1, &[], &[10]),
            (2, &[10], &[11]),
            (3, &[11], &[10]),
        ]);
        // M2 and M3 form a cycle through V1/V2 even though M1 is acyclic.
        assert_eq!(err, Err(GraphError::CycleDetected));
    }

    #[test]
    fn self_read_write_is_a_cycle() {
        let err = order_of(&[(1, &[10], &[10])]).unwrap_err();
        assert_eq!(err, GraphError::CycleDetected);
    }

    #[test]
    fn producerless_input_is_already_available() {
        // V1 has no producer in the graph; M1 must still be schedulable.
        let order = order_of(&[(1, &[10], &[11])]).unwrap();
        assert_eq!(order, vec![MapperId::from(1)]);
    }

    #[test]
    fn independent_mappers_order_deterministically() {
        let mappers: &[(u64, &[u64], &[u64])] =
            &[(3, &[30], &[31]), (1, &[10], &[11]), (2, &[20], &[21])];
        let first = order_of(mappers).unwrap();
        let second = order_of(mappers).unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn shared_output_orders_all_producers_before_consumer() {
        // M1 and M2 both write V1; M3 reads it.
        let order = order_of(&[(3, &[10], &[]), (1, &[], &[10]), (2, &[], &[10])]).unwrap();

        let pos = |id: u64| {
            order
                .iter()
                .position(|&m| m == MapperId::from(id))
                .unwrap()
        };
        assert!(pos(1) < pos(3));
        assert!(pos(2) < pos(3));
    }

    #[test]
    fn diamond_orders_both_branches_before_join() {
        // M1 writes V1; M2 and M3 each read V1 and write V2/V3; M4 reads both.
        let order = order_of(&[
            (4, &[11, 12], &[]),
            (2, &[10], &[11]),
            (3, &[10], &[12]),
            (1, &[], &[10]),
        ])
        .unwrap();

        let pos = |id: u64| {
            order
                .iter()
                .position(|&m| m == MapperId::from(id))
                .unwrap()
        };
        assert!(pos(1) < pos(2));
        assert!(pos(1) < pos(3));
        assert!(pos(2) < pos(4));
        assert!(pos(3) < pos(4));
    }

    #[test]
    fn empty_graph_yields_empty_order() {
        let order = order_of(&[]).unwrap();
        assert!(order.is_empty());
    }

    #[test]
    fn graph_counts_nodes() {
        let graph = DependencyGraph::build(vec![(
            MapperId::from(1),
            &[CellId::from(10)][..],
            &[CellId::from(11)][..],
        )]);
        // One mapper plus two distinct cells.
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.mapper_count(), 1);
    }
}
