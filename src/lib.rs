//! Collabill: collaborative task tracking with owner-validated billing.
//!
//! Projects are shared between an owner and collaborators. Work is tracked as
//! tasks on a Kanban board whose columns follow a fixed workflow; only the
//! project owner can accept reviewed work, and validated work forms the basis
//! for invoicing.
//!
//! # Architecture
//!
//! Collabill follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`workflow`]: Task statuses and the transition rules between them
//! - [`project`]: Project ownership and membership
//! - [`task`]: Task creation, status changes, deletion and billing summaries

pub mod project;
pub mod task;
pub mod workflow;
