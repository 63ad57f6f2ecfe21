//! Shared world state for task workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use collabill::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{ProjectId, UserId},
    services::ProjectService,
};
use collabill::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::{TaskService, TaskServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Project service type used by the BDD world.
pub type TestProjectService = ProjectService<InMemoryProjectRepository, DefaultClock>;

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub projects: TestProjectService,
    pub service: TestTaskService,
    pub users: HashMap<String, UserId>,
    pub project_id: Option<ProjectId>,
    pub owner: Option<UserId>,
    pub task: Option<Task>,
    pub last_move_result: Option<Result<Task, TaskServiceError>>,
    pub last_delete_result: Option<Result<(), TaskServiceError>>,
}

impl TaskWorkflowWorld {
    /// Creates a world with empty scenario state.
    #[must_use]
    pub fn new() -> Self {
        let project_repo = Arc::new(InMemoryProjectRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            projects: ProjectService::new(Arc::clone(&project_repo), Arc::clone(&clock)),
            service: TaskService::new(Arc::new(InMemoryTaskRepository::new()), project_repo, clock),
            users: HashMap::new(),
            project_id: None,
            owner: None,
            task: None,
            last_move_result: None,
            last_delete_result: None,
        }
    }

    /// Returns the user known by `name`, registering a new one if needed.
    pub fn user(&mut self, name: &str) -> UserId {
        *self
            .users
            .entry(name.to_owned())
            .or_insert_with(UserId::new)
    }

    /// Returns the project created by the background steps.
    ///
    /// # Errors
    ///
    /// Returns an error if no project has been created yet.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the owner of the scenario's project.
    ///
    /// # Errors
    ///
    /// Returns an error if no project has been created yet.
    pub fn owner(&self) -> Result<UserId, eyre::Report> {
        self.owner
            .ok_or_else(|| eyre::eyre!("missing project owner in scenario world"))
    }

    /// Returns the identifier of the scenario's task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task
            .as_ref()
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
