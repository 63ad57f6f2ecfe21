//! Repository port for task persistence and board lookup.

use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId};
use crate::workflow::TaskStatus;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Writes are split by concern. Status writes touch only the status,
/// validation and `updated_at` columns and are guarded by the status the
/// decision was taken on. Detail writes touch only descriptive columns and
/// never land on a validated row. Each is a single-row atomic write, so two
/// requests working from the same snapshot cannot erase each other's
/// changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists the status and validation metadata of `task`, provided the
    /// stored status still equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Conflict`] when the stored status has
    /// moved on, or [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update_status(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()>;

    /// Persists title, description, size and assignee of `task`, provided
    /// the stored task is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Conflict`] when the stored task is
    /// validated, or [`TaskRepositoryError::NotFound`] when it does not exist.
    async fn update_details(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task of a project, oldest first.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored task changed underneath the write.
    #[error("task {0} was modified concurrently")]
    Conflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
