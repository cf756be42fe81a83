//! Integration test utilities for the forum server
//!
//! Spawns the full HTTP stack against a real PostgreSQL database.


pub use fixtures::*;
pub use helpers::*;
