//! Mapper Primitives
//!
//! This module implements the mapper side of the scheduler: the mapper
//! primitive itself, the externally-owned dirty flag that gates its
//! execution, and the registry that owns the live mapper set and drives
//! execution once per animation frame.
//!
//! # Concepts
//!
//! ## Mappers
//!
//! A mapper is a reactive computation with a fixed set of input cells it
//! reads and output cells it writes, plus an opaque body invoked when the
//! mapper is due to run. Inputs and outputs are fixed for the mapper's
//! lifetime; changing them requires stop + restart.
//!
//! ## Dirty Flags
//!
//! The scheduler does not decide *whether* a mapper needs to run, only *in
//! what order*. The value store flags a mapper dirty whenever one of its
//! declared inputs changes; the registry reads the flag at the mapper's
//! turn and skips clean mappers. The registry never clears flags — that
//! belongs to the value-store side, because upstream writes can land
//! mid-frame from earlier mappers in the same execution pass.
//!
//! ## Registry
//!
//! The [`MapperRegistry`] owns the live mappers and a cached execution
//! order. Starting or stopping a mapper only marks the registry stale; the
//! order is rebuilt lazily at the top of the next
//! [`execute`](MapperRegistry::execute) call.

mod cell;
mod mapper;
mod registry;

pub use cell::DirtyFlag;
pub use mapper::Mapper;
pub use registry::MapperRegistry;
