//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use collabill::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, UserId},
    services::{AddMemberRequest, CreateProjectRequest, ProjectService},
};
use collabill::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::{CreateTaskRequest, TaskService, TaskServiceError, UpdateTaskStatusRequest},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Project service type wired to in-memory storage.
pub type TestProjectService = ProjectService<InMemoryProjectRepository, DefaultClock>;

/// Task service type wired to in-memory storage.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Project and task services sharing one project store.
pub struct Board {
    pub projects: TestProjectService,
    pub tasks: TestTaskService,
}

/// Provides services backed by fresh in-memory repositories.
#[fixture]
pub fn board() -> Board {
    let project_repo = Arc::new(InMemoryProjectRepository::new());
    let clock = Arc::new(DefaultClock);
    Board {
        projects: ProjectService::new(Arc::clone(&project_repo), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::new(InMemoryTaskRepository::new()), project_repo, clock),
    }
}

/// A project with one owner and one collaborator.
pub struct Team {
    pub project: Project,
    pub owner: UserId,
    pub collaborator: UserId,
}

impl Board {
    /// Creates a project and adds a single collaborator to it.
    ///
    /// # Errors
    ///
    /// Returns an error if project creation or membership update fails.
    pub async fn team(&self, name: &str) -> Result<Team, eyre::Report> {
        let owner = UserId::new();
        let collaborator = UserId::new();
        let created = self
            .projects
            .create_project(CreateProjectRequest::new(name, owner))
            .await?;
        let project = self
            .projects
            .add_member(AddMemberRequest::new(created.id(), owner, collaborator))
            .await?;
        Ok(Team {
            project,
            owner,
            collaborator,
        })
    }

    /// Creates a task on the team's project as the collaborator.
    ///
    /// # Errors
    ///
    /// Returns an error if task creation fails.
    pub async fn task(&self, team: &Team, title: &str) -> Result<Task, eyre::Report> {
        Ok(self
            .tasks
            .create_task(CreateTaskRequest::new(
                team.project.id(),
                team.collaborator,
                title,
            ))
            .await?)
    }

    /// Moves a task, returning the raw service result.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        actor: UserId,
        status: &str,
    ) -> Result<Task, TaskServiceError> {
        self.tasks
            .update_status(UpdateTaskStatusRequest::new(task_id, actor, status))
            .await
    }

    /// Moves a task through the given statuses as `actor`.
    ///
    /// # Errors
    ///
    /// Returns an error if any move is rejected.
    pub async fn walk(
        &self,
        task_id: TaskId,
        actor: UserId,
        statuses: &[&str],
    ) -> Result<Task, eyre::Report> {
        let mut last = None;
        for status in statuses {
            last = Some(self.move_task(task_id, actor, status).await?);
        }
        last.ok_or_else(|| eyre::eyre!("walk requires at least one status"))
    }
}
