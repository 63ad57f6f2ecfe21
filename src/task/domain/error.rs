//! Error types for task domain validation and parsing.

use super::TaskId;
use crate::project::domain::ActorRole;
use crate::workflow::TaskStatus;
use thiserror::Error;

/// Errors returned while constructing or mutating tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the configured limit.
    #[error("task title exceeds {max} characters: {actual}")]
    TaskTitleTooLong {
        /// Maximum permitted length.
        max: usize,
        /// Length of the rejected title.
        actual: usize,
    },

    /// The task description exceeds the configured limit.
    #[error("task description exceeds {max} characters: {actual}")]
    DescriptionTooLong {
        /// Maximum permitted length.
        max: usize,
        /// Length of the rejected description.
        actual: usize,
    },

    /// The workflow does not permit the requested move for this role.
    #[error("task {task_id} cannot move from {from} to {to} as {role}")]
    TransitionNotAllowed {
        /// Task being moved.
        task_id: TaskId,
        /// Status read before the move.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
        /// Role of the requesting user.
        role: ActorRole,
    },

    /// Tasks in this status must be moved out before deletion.
    #[error("task {task_id} cannot be deleted while {status}")]
    DeleteNotAllowed {
        /// Task targeted for deletion.
        task_id: TaskId,
        /// Current status.
        status: TaskStatus,
    },

    /// Validated tasks no longer accept descriptive edits.
    #[error("task {0} is validated and can no longer be edited")]
    ValidatedTaskFrozen(TaskId),

    /// Validation metadata does not match the task status.
    #[error("task {0} has validation metadata inconsistent with its status")]
    InconsistentValidation(TaskId),
}

/// Error returned while parsing task sizes from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task size: {0}")]
pub struct ParseTaskSizeError(pub String);
