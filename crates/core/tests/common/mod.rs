//! Shared helpers for the rk-core integration tests.
//!
//! - Fixtures: agents, pipelines, sessions and configuration directories
//! - Assertions over emitted run events

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
