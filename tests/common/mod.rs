//! Common test utilities for ecs-metadata integration tests

#[allow(dead_code)]
pub mod agent;
#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use agent::*;
#[allow(unused_imports)]
pub use fixtures::*;
