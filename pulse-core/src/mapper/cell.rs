//! Dirty Flags
//!
//! A [`DirtyFlag`] is the one piece of state the scheduler shares with the
//! external value store. The store keeps a clone of each mapper's flag and
//! sets it whenever one of the mapper's declared input cells changes; the
//! registry reads it at the mapper's scheduled turn to decide whether to
//! invoke the body.
//!
//! Because mappers execute in topological order, a write performed by an
//! earlier mapper in the same frame flags its downstream consumers before
//! their turn arrives — the in-order execute loop always sees up-to-date
//! flags.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared dirty marker for one mapper.
///
/// Clones share state: the value store holds one handle, the mapper holds
/// another. The flag is atomic only so both sides can hold independent
/// handles; the scheduler itself is single-threaded.
#[derive(Clone, Debug)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    /// Create a flag with the given initial state.
    pub fn new(dirty: bool) -> Self {
        Self(Arc::new(AtomicBool::new(dirty)))
    }

    /// Mark the mapper as needing to run.
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Mark the mapper as up to date.
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Check whether the mapper needs to run.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for DirtyFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_set_and_clear() {
        let flag = DirtyFlag::new(false);
        assert!(!flag.is_set());

        flag.set();
        assert!(flag.is_set());

        flag.clear();
        assert!(!flag.is_set());
    }

    #[test]
    fn clones_share_state() {
        let store_side = DirtyFlag::new(false);
        let mapper_side = store_side.clone();

        store_side.set();
        assert!(mapper_side.is_set());

        mapper_side.clear();
        assert!(!store_side.is_set());
    }
}
