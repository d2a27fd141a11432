//! Shared test utilities for blstats integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Builders panic on bad input instead of returning
//! `Result`; fixtures are plain constants so harnesses stay deterministic.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
