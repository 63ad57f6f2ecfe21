//! Task aggregate root and status change records.

use super::{TaskDescription, TaskDomainError, TaskId, TaskSize, TaskTitle};
use crate::project::domain::{ActorRole, ProjectId, UserId};
use crate::workflow::{self, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Who validated a task and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskValidation {
    /// Validation timestamp.
    pub validated_at: DateTime<Utc>,
    /// Validating user.
    pub validated_by: UserId,
}

/// Effect of a status change on validation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationChange {
    /// Validation metadata was recorded.
    Stamped,
    /// Validation metadata was removed.
    Cleared,
    /// Validation metadata was left as it was.
    Unchanged,
}

/// Record of an accepted status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the change.
    pub from: TaskStatus,
    /// Status after the change.
    pub to: TaskStatus,
    /// Effect on validation metadata.
    pub validation: ValidationChange,
}

impl StatusChange {
    /// Returns `true` when the change moved the task to a different column.
    #[must_use]
    pub fn is_move(&self) -> bool {
        self.from != self.to
    }
}

/// Task aggregate root.
///
/// Serde goes through [`PersistedTaskData`], so deserialized tasks pass the
/// same validation check as rows loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedTaskData", into = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    size: Option<TaskSize>,
    assignee: Option<UserId>,
    status: TaskStatus,
    validation: Option<TaskValidation>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning project.
    pub project_id: ProjectId,
    /// Validated title.
    pub title: TaskTitle,
    /// Optional description.
    pub description: Option<TaskDescription>,
    /// Optional size estimate.
    pub size: Option<TaskSize>,
    /// Optional assignee.
    pub assignee: Option<UserId>,
    /// Creating user.
    pub created_by: UserId,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<TaskDescription>,
    /// Persisted size estimate.
    pub size: Option<TaskSize>,
    /// Persisted assignee.
    pub assignee: Option<UserId>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted validation timestamp.
    pub validated_at: Option<DateTime<Utc>>,
    /// Persisted validating user.
    pub validated_by: Option<UserId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in [`TaskStatus::Todo`].
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            size: data.size,
            assignee: data.assignee,
            status: TaskStatus::Todo,
            validation: None,
            created_by: data.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InconsistentValidation`] unless both
    /// validation columns are set exactly when the status is
    /// [`TaskStatus::Validated`].
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        let validation = match (data.status, data.validated_at, data.validated_by) {
            (TaskStatus::Validated, Some(validated_at), Some(validated_by)) => {
                Some(TaskValidation {
                    validated_at,
                    validated_by,
                })
            }
            (TaskStatus::Validated, _, _) | (_, Some(_), _) | (_, _, Some(_)) => {
                return Err(TaskDomainError::InconsistentValidation(data.id));
            }
            _ => None,
        };

        Ok(Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            size: data.size,
            assignee: data.assignee,
            status: data.status,
            validation,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the size estimate, if any.
    #[must_use]
    pub const fn size(&self) -> Option<TaskSize> {
        self.size
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the validation record while the task is validated.
    #[must_use]
    pub const fn validation(&self) -> Option<&TaskValidation> {
        self.validation.as_ref()
    }

    /// Returns the validation timestamp while the task is validated.
    #[must_use]
    pub fn validated_at(&self) -> Option<DateTime<Utc>> {
        self.validation.map(|validation| validation.validated_at)
    }

    /// Returns the validating user while the task is validated.
    #[must_use]
    pub fn validated_by(&self) -> Option<UserId> {
        self.validation.map(|validation| validation.validated_by)
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the statuses this task may move to for `role`.
    #[must_use]
    pub fn allowed_transitions(&self, role: ActorRole) -> BTreeSet<TaskStatus> {
        workflow::allowed_transitions(self.status, role.is_owner())
    }

    /// Moves the task to `to` on behalf of `actor`.
    ///
    /// Entering [`TaskStatus::Validated`] records `actor` and the current
    /// time; leaving it clears both. Moving a task onto its own status is
    /// accepted and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TransitionNotAllowed`] when the workflow
    /// rejects the move for `role`. The task is left untouched.
    pub fn change_status(
        &mut self,
        to: TaskStatus,
        actor: UserId,
        role: ActorRole,
        clock: &impl Clock,
    ) -> Result<StatusChange, TaskDomainError> {
        let from = self.status;
        if !workflow::can_transition(from, to, role.is_owner()) {
            return Err(TaskDomainError::TransitionNotAllowed {
                task_id: self.id,
                from,
                to,
                role,
            });
        }

        if from == to {
            return Ok(StatusChange {
                from,
                to,
                validation: ValidationChange::Unchanged,
            });
        }

        let timestamp = clock.utc();
        let validation = if to == TaskStatus::Validated {
            self.validation = Some(TaskValidation {
                validated_at: timestamp,
                validated_by: actor,
            });
            ValidationChange::Stamped
        } else if self.validation.take().is_some() {
            ValidationChange::Cleared
        } else {
            ValidationChange::Unchanged
        };

        self.status = to;
        self.updated_at = timestamp;
        Ok(StatusChange {
            from,
            to,
            validation,
        })
    }

    /// Checks that the task may be deleted in its current status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeleteNotAllowed`] for tasks under review
    /// or already validated.
    pub fn ensure_deletable(&self) -> Result<(), TaskDomainError> {
        if workflow::can_delete(self.status) {
            Ok(())
        } else {
            Err(TaskDomainError::DeleteNotAllowed {
                task_id: self.id,
                status: self.status,
            })
        }
    }

    /// Checks that descriptive fields may still change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ValidatedTaskFrozen`] once the task is
    /// validated; its size and title are the basis of billing.
    pub fn ensure_editable(&self) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Validated {
            Err(TaskDomainError::ValidatedTaskFrozen(self.id))
        } else {
            Ok(())
        }
    }

    /// Replaces the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ValidatedTaskFrozen`] for validated tasks.
    pub fn assign(
        &mut self,
        assignee: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_editable()?;
        self.assignee = assignee;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ValidatedTaskFrozen`] for validated tasks.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_editable()?;
        self.title = title;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the size estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ValidatedTaskFrozen`] for validated tasks.
    pub fn resize(
        &mut self,
        size: Option<TaskSize>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_editable()?;
        self.size = size;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

impl From<Task> for PersistedTaskData {
    fn from(task: Task) -> Self {
        let (validated_at, validated_by) = task
            .validation
            .map(|v| (v.validated_at, v.validated_by))
            .unzip();
        Self {
            id: task.id,
            project_id: task.project_id,
            title: task.title,
            description: task.description,
            size: task.size,
            assignee: task.assignee,
            status: task.status,
            validated_at,
            validated_by,
            created_by: task.created_by,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
