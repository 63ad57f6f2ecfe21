//! Kanban workflow rules for task status changes.
//!
//! The engine answers three questions over plain values: whether a status
//! change is legal for a given role, which targets are reachable from a
//! status, and whether a task in a status may be deleted. It holds no state
//! and performs no I/O, so callers may evaluate it from any number of
//! concurrent requests.
//!
//! Callers are expected to evaluate the engine against the status read at
//! the start of a request and to apply the decision in the same single-row
//! write.

mod engine;
mod error;
mod status;

pub use engine::{allowed_transitions, can_delete, can_transition};
pub use error::ParseTaskStatusError;
pub use status::TaskStatus;

#[cfg(test)]
mod tests;
