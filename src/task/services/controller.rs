//! Service layer for task creation, status changes and deletion.
//!
//! Every operation resolves the role the requesting user holds on the
//! task's project before consulting the workflow engine. Status decisions
//! are taken against the task as read at the start of the request and
//! persisted with a write guarded by the status that was read.

use super::TaskConfig;
use crate::project::{
    domain::{ActorRole, Project, ProjectId, UserId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{
        NewTaskData, Task, TaskDescription, TaskDomainError, TaskId, TaskSize, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::workflow::{ParseTaskStatusError, TaskStatus};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    actor: UserId,
    title: String,
    description: Option<String>,
    size: Option<TaskSize>,
    assignee: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(project_id: ProjectId, actor: UserId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            actor,
            title: title.into(),
            description: None,
            size: None,
            assignee: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the size estimate.
    #[must_use]
    pub const fn with_size(mut self, size: TaskSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

/// Request payload for moving a task to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskStatusRequest {
    task_id: TaskId,
    actor: UserId,
    status: String,
}

impl UpdateTaskStatusRequest {
    /// Creates a request in which `actor` moves the task to `status`.
    ///
    /// The status is parsed by the service so that unknown values surface
    /// as [`TaskServiceError::InvalidStatus`].
    #[must_use]
    pub fn new(task_id: TaskId, actor: UserId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            actor,
            status: status.into(),
        }
    }
}

/// Request payload for changing a task's assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignTaskRequest {
    task_id: TaskId,
    actor: UserId,
    assignee: Option<UserId>,
}

impl AssignTaskRequest {
    /// Creates a request assigning the task to `assignee`, or unassigning it
    /// when `None`.
    #[must_use]
    pub const fn new(task_id: TaskId, actor: UserId, assignee: Option<UserId>) -> Self {
        Self {
            task_id,
            actor,
            assignee,
        }
    }
}

/// Request payload for editing a task's title or size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    task_id: TaskId,
    actor: UserId,
    title: Option<String>,
    size: Option<Option<TaskSize>>,
}

impl EditTaskRequest {
    /// Creates a request that leaves every field unchanged.
    #[must_use]
    pub const fn new(task_id: TaskId, actor: UserId) -> Self {
        Self {
            task_id,
            actor,
            title: None,
            size: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the size estimate; `None` clears it.
    #[must_use]
    pub const fn with_size(mut self, size: Option<TaskSize>) -> Self {
        self.size = Some(size);
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation or workflow rules rejected the request.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
    /// The requested status is not a known value.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The user neither owns nor belongs to the project.
    #[error("user {user_id} is not a member of project {project_id}")]
    NotProjectMember {
        /// Project targeted by the request.
        project_id: ProjectId,
        /// Requesting or referenced user.
        user_id: UserId,
    },
    /// The operation is reserved to the project owner.
    #[error("user {user_id} does not own project {project_id}")]
    NotProjectOwner {
        /// Project targeted by the request.
        project_id: ProjectId,
        /// Requesting user.
        user_id: UserId,
    },
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task controller coordinating membership checks, workflow decisions and
/// persistence.
///
/// Task-scoped operations look the task up before checking membership,
/// because the project is only known from the task. An unknown id is
/// therefore [`TaskServiceError::TaskNotFound`] for every caller, while an
/// outsider naming an existing task gets
/// [`TaskServiceError::NotProjectMember`]. Task ids are random v4 UUIDs, so
/// the distinction does not make ids guessable.
#[derive(Clone)]
pub struct TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
    config: TaskConfig,
}

impl<T, P, C> TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a task service with default limits.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self::with_config(tasks, projects, clock, TaskConfig::default())
    }

    /// Creates a task service with custom limits.
    #[must_use]
    pub const fn with_config(
        tasks: Arc<T>,
        projects: Arc<P>,
        clock: Arc<C>,
        config: TaskConfig,
    ) -> Self {
        Self {
            tasks,
            projects,
            clock,
            config,
        }
    }

    /// Returns the active limits.
    #[must_use]
    pub const fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Creates a task in `TODO` on a project the actor belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotProjectMember`] when the actor or the
    /// proposed assignee does not belong to the project,
    /// [`TaskServiceError::Domain`] when the title or description is invalid,
    /// and repository errors when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            project_id,
            actor,
            title,
            description,
            size,
            assignee,
        } = request;

        let (project, _) = self.authorize(project_id, actor).await?;
        if let Some(user) = assignee {
            ensure_member(&project, user)?;
        }

        let data = NewTaskData {
            project_id,
            title: TaskTitle::new(title, self.config.max_title_length)?,
            description: description
                .map(|text| TaskDescription::new(text, self.config.max_description_length))
                .transpose()?,
            size,
            assignee,
            created_by: actor,
        };
        let task = Task::new(data, &*self.clock);
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), project_id = %project_id, actor = %actor, "task created");
        Ok(task)
    }

    /// Moves a task to the requested status.
    ///
    /// Entering `VALIDATED` records the actor and the current time; leaving
    /// it clears that record. A move onto the task's own status succeeds
    /// without writing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidStatus`] for unknown statuses,
    /// [`TaskServiceError::NotProjectMember`] for outsiders, and
    /// [`TaskDomainError::TransitionNotAllowed`] (wrapped in
    /// [`TaskServiceError::Domain`]) when the workflow denies the move, in
    /// which case nothing is persisted. If another request moved the task
    /// after it was read, the write fails with
    /// [`TaskRepositoryError::Conflict`] (wrapped in
    /// [`TaskServiceError::Repository`]).
    pub async fn update_status(&self, request: UpdateTaskStatusRequest) -> TaskServiceResult<Task> {
        let UpdateTaskStatusRequest {
            task_id,
            actor,
            status,
        } = request;
        let target = TaskStatus::try_from(status.as_str())?;

        let mut task = self.load_task(task_id).await?;
        let (_, role) = self.authorize(task.project_id(), actor).await?;

        let change = match task.change_status(target, actor, role, &*self.clock) {
            Ok(change) => change,
            Err(err) => {
                warn!(
                    task_id = %task_id,
                    actor = %actor,
                    role = %role,
                    from = %task.status(),
                    to = %target,
                    "status change denied"
                );
                return Err(err.into());
            }
        };

        if change.is_move() {
            self.tasks.update_status(&task, change.from).await?;
            info!(
                task_id = %task_id,
                actor = %actor,
                from = %change.from,
                to = %change.to,
                validation = ?change.validation,
                "task status changed"
            );
        }
        Ok(task)
    }

    /// Lists the statuses the actor may move a task to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] for unknown tasks and
    /// [`TaskServiceError::NotProjectMember`] for outsiders.
    pub async fn allowed_transitions(
        &self,
        task_id: TaskId,
        actor: UserId,
    ) -> TaskServiceResult<BTreeSet<TaskStatus>> {
        let task = self.load_task(task_id).await?;
        let (_, role) = self.authorize(task.project_id(), actor).await?;
        Ok(task.allowed_transitions(role))
    }

    /// Deletes a task.
    ///
    /// Tasks in `IN_REVIEW` or `VALIDATED` cannot be deleted by any role.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeleteNotAllowed`] (wrapped in
    /// [`TaskServiceError::Domain`]) for protected statuses,
    /// [`TaskServiceError::NotProjectMember`] for outsiders, and repository
    /// errors when persistence fails.
    pub async fn delete_task(&self, task_id: TaskId, actor: UserId) -> TaskServiceResult<()> {
        let task = self.load_task(task_id).await?;
        self.authorize(task.project_id(), actor).await?;

        if let Err(err) = task.ensure_deletable() {
            warn!(task_id = %task_id, actor = %actor, status = %task.status(), "deletion denied");
            return Err(err.into());
        }

        self.tasks.delete(task_id).await?;
        info!(task_id = %task_id, actor = %actor, "task deleted");
        Ok(())
    }

    /// Changes or clears a task's assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotProjectMember`] when the actor or the
    /// new assignee does not belong to the project, and
    /// [`TaskDomainError::ValidatedTaskFrozen`] (wrapped in
    /// [`TaskServiceError::Domain`]) once the task is validated.
    pub async fn assign_task(&self, request: AssignTaskRequest) -> TaskServiceResult<Task> {
        let AssignTaskRequest {
            task_id,
            actor,
            assignee,
        } = request;
        let mut task = self.load_task(task_id).await?;
        let (project, _) = self.authorize(task.project_id(), actor).await?;
        if let Some(user) = assignee {
            ensure_member(&project, user)?;
        }

        task.assign(assignee, &*self.clock)?;
        self.tasks.update_details(&task).await?;
        Ok(task)
    }

    /// Edits a task's title or size estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the new title is invalid or
    /// the task is already validated, and
    /// [`TaskServiceError::NotProjectMember`] for outsiders. A concurrent
    /// validation surfaces as [`TaskRepositoryError::Conflict`] (wrapped in
    /// [`TaskServiceError::Repository`]).
    pub async fn edit_task(&self, request: EditTaskRequest) -> TaskServiceResult<Task> {
        let EditTaskRequest {
            task_id,
            actor,
            title,
            size,
        } = request;
        let mut task = self.load_task(task_id).await?;
        self.authorize(task.project_id(), actor).await?;
        task.ensure_editable()?;

        if let Some(text) = title {
            let new_title = TaskTitle::new(text, self.config.max_title_length)?;
            task.rename(new_title, &*self.clock)?;
        }
        if let Some(new_size) = size {
            task.resize(new_size, &*self.clock)?;
        }

        self.tasks.update_details(&task).await?;
        Ok(task)
    }

    /// Lists a project's tasks, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] for unknown projects and
    /// [`TaskServiceError::NotProjectMember`] for outsiders.
    pub async fn list_project_tasks(
        &self,
        project_id: ProjectId,
        actor: UserId,
    ) -> TaskServiceResult<Vec<Task>> {
        self.authorize(project_id, actor).await?;
        Ok(self.tasks.find_by_project(project_id).await?)
    }

    /// Loads the project and resolves the role `actor` holds on it.
    pub(super) async fn authorize(
        &self,
        project_id: ProjectId,
        actor: UserId,
    ) -> TaskServiceResult<(Project, ActorRole)> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(TaskServiceError::ProjectNotFound(project_id))?;

        match project.role_of(actor) {
            Some(role) => Ok((project, role)),
            None => {
                warn!(project_id = %project_id, actor = %actor, "non-member access denied");
                Err(TaskServiceError::NotProjectMember {
                    project_id,
                    user_id: actor,
                })
            }
        }
    }

    pub(super) async fn load_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    pub(super) fn tasks(&self) -> &T {
        &self.tasks
    }
}

fn ensure_member(project: &Project, user: UserId) -> TaskServiceResult<()> {
    if project.role_of(user).is_some() {
        Ok(())
    } else {
        Err(TaskServiceError::NotProjectMember {
            project_id: project.id(),
            user_id: user,
        })
    }
}
