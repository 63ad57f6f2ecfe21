//! Project ownership and membership for Collabill.
//!
//! A project is owned by the user who created it; other users join as
//! collaborators. The role a user holds on a project decides which task
//! moves the workflow engine permits them. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
