//! Error Types
//!
//! The scheduler has a deliberately small error surface. A cyclic mapper
//! graph is a programmer error in the set of registered mappers, not a
//! recoverable runtime condition: it propagates out of
//! [`MapperRegistry::execute`](crate::MapperRegistry::execute) so the host
//! can surface it loudly, and the registry stays stale so every subsequent
//! frame fails the same way until the offending mappers are stopped.

use thiserror::Error;

/// Errors produced while rebuilding the mapper execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The dependency graph contains a cycle: some mapper (transitively)
    /// consumes a value it also produces, so no valid execution order
    /// exists.
    #[error("cycle detected in the mapper dependency graph")]
    CycleDetected,
}
