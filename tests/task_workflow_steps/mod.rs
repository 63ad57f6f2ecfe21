//! Step definitions for task workflow BDD scenarios.

pub mod then;
pub mod world;
