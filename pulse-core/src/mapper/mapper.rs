//! Mapper Implementation
//!
//! A Mapper is a registered reactive computation: it declares the cells it
//! reads and writes, carries an externally-owned dirty flag, and wraps an
//! opaque body the registry invokes once per scheduled run.
//!
//! The body is generic over an execution-context type `C` so this crate
//! has no dependency on any particular execution engine: the host passes
//! whatever runtime handle its mapper bodies need (a script-engine
//! reference, a test log, a unit).

use smallvec::SmallVec;

use super::cell::DirtyFlag;
use crate::graph::{CellId, MapperId};

/// A live reactive computation with declared input/output cells.
///
/// # Example
///
/// ```rust
/// use pulse_core::{CellId, DirtyFlag, Mapper, MapperId};
///
/// let progress = CellId::next();
/// let opacity = CellId::next();
///
/// let mapper: Mapper<()> = Mapper::new(
///     MapperId::from(1),
///     &[progress],
///     &[opacity],
///     DirtyFlag::new(true),
///     |_| { /* read progress, write opacity */ },
/// );
/// assert!(mapper.is_dirty());
/// ```
pub struct Mapper<C> {
    /// Caller-assigned identity, stable for the mapper's lifetime.
    id: MapperId,

    /// Distinct cells this mapper reads. May be empty.
    inputs: SmallVec<[CellId; 4]>,

    /// Distinct cells this mapper writes upon execution.
    outputs: SmallVec<[CellId; 4]>,

    /// Externally-owned run gate; see [`DirtyFlag`].
    dirty: DirtyFlag,

    /// The mapper body.
    body: Box<dyn FnMut(&mut C)>,
}

impl<C> Mapper<C> {
    /// Create a mapper from its fixed parts.
    ///
    /// Duplicate cells in `inputs` or `outputs` are collapsed: the graph
    /// counts distinct cells only, so a duplicated declaration must not
    /// inflate in-degrees.
    pub fn new<F>(
        id: MapperId,
        inputs: &[CellId],
        outputs: &[CellId],
        dirty: DirtyFlag,
        body: F,
    ) -> Self
    where
        F: FnMut(&mut C) + 'static,
    {
        Self {
            id,
            inputs: dedup(inputs),
            outputs: dedup(outputs),
            dirty,
            body: Box::new(body),
        }
    }

    /// Get the mapper's identity.
    pub fn id(&self) -> MapperId {
        self.id
    }

    /// Cells this mapper reads.
    pub fn inputs(&self) -> &[CellId] {
        &self.inputs
    }

    /// Cells this mapper writes.
    pub fn outputs(&self) -> &[CellId] {
        &self.outputs
    }

    /// Check whether the mapper is due to run this frame.
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_set()
    }

    /// Get a handle to the dirty flag, for the value-store side.
    pub fn dirty_flag(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    /// Run the mapper body.
    pub(crate) fn invoke(&mut self, ctx: &mut C) {
        (self.body)(ctx);
    }
}

impl<C> std::fmt::Debug for Mapper<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("id", &self.id)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

fn dedup(cells: &[CellId]) -> SmallVec<[CellId; 4]> {
    let mut cells: SmallVec<[CellId; 4]> = SmallVec::from_slice(cells);
    cells.sort_unstable();
    cells.dedup();
    cells
}
