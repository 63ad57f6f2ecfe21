//! Domain model for Kanban tasks.
//!
//! The aggregate owns the pairing between a task's status and its
//! validation metadata; transition legality is delegated to the workflow
//! engine.

mod error;
mod ids;
mod size;
mod task;

pub use error::{ParseTaskSizeError, TaskDomainError};
pub use ids::{TaskDescription, TaskId, TaskTitle};
pub use size::TaskSize;
pub use task::{
    NewTaskData, PersistedTaskData, StatusChange, Task, TaskValidation, ValidationChange,
};
