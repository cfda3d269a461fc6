//! Launchpad: launch coordination platform for hardware + payments rollouts.

pub mod model;
pub mod server;
