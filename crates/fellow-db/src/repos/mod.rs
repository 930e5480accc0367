//! Repository modules implementing the relationship store, state machine
//! execution, aggregation and profile/search composition.
//!
//! Each module adds methods to `FellowService` via `impl FellowService` blocks.

pub mod aggregate;
pub mod audit;
pub mod edge;
pub mod follow;
pub mod social;
