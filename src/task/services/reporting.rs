//! Validated-work summaries used as the basis for invoicing.

use super::{TaskService, TaskServiceError, TaskServiceResult};
use crate::project::{
    domain::{ProjectId, UserId},
    ports::ProjectRepository,
};
use crate::task::{domain::Task, ports::TaskRepository};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Query for the tasks validated on a project within a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedWorkQuery {
    project_id: ProjectId,
    actor: UserId,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl ValidatedWorkQuery {
    /// Creates a query covering the half-open period `[from, to)`.
    #[must_use]
    pub const fn new(
        project_id: ProjectId,
        actor: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            actor,
            from,
            to,
        }
    }
}

/// Tasks validated within a billing period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWorkSummary {
    /// Project summarised.
    pub project_id: ProjectId,
    /// Inclusive period start.
    pub from: DateTime<Utc>,
    /// Exclusive period end.
    pub to: DateTime<Utc>,
    /// Validated tasks, in validation order.
    pub tasks: Vec<Task>,
    /// Sum of the size points of the validated tasks; unsized tasks count
    /// for nothing.
    pub total_points: u32,
}

impl<T, P, C> TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Summarises the tasks validated on a project in `[from, to)`.
    ///
    /// Only the project owner may read billing data.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotProjectOwner`] for collaborators,
    /// [`TaskServiceError::NotProjectMember`] for outsiders, and repository
    /// errors when lookup fails.
    pub async fn validated_work(
        &self,
        query: ValidatedWorkQuery,
    ) -> TaskServiceResult<ValidatedWorkSummary> {
        let ValidatedWorkQuery {
            project_id,
            actor,
            from,
            to,
        } = query;
        let (_, role) = self.authorize(project_id, actor).await?;
        if !role.is_owner() {
            return Err(TaskServiceError::NotProjectOwner {
                project_id,
                user_id: actor,
            });
        }

        let mut tasks: Vec<Task> = self
            .tasks()
            .find_by_project(project_id)
            .await?
            .into_iter()
            .filter(|task| {
                task.validated_at()
                    .is_some_and(|validated_at| validated_at >= from && validated_at < to)
            })
            .collect();
        tasks.sort_by_key(Task::validated_at);

        let total_points = tasks
            .iter()
            .filter_map(Task::size)
            .map(|size| size.points())
            .sum();

        Ok(ValidatedWorkSummary {
            project_id,
            from,
            to,
            tasks,
            total_points,
        })
    }
}
