//! Task management for Collabill.
//!
//! Tasks live on a project's Kanban board. Every status change is checked
//! against the [`crate::workflow`] engine with the role the requesting user
//! holds on the project; moving a task into `VALIDATED` records who validated
//! it and when. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
