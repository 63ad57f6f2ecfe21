//! Service layer for project creation and collaborator management.

use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, ProjectName, UserId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    owner: UserId,
}

impl CreateProjectRequest {
    /// Creates a request for a project owned by `owner`.
    #[must_use]
    pub fn new(name: impl Into<String>, owner: UserId) -> Self {
        Self {
            name: name.into(),
            owner,
        }
    }
}

/// Request payload for adding a collaborator to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddMemberRequest {
    project_id: ProjectId,
    actor: UserId,
    user: UserId,
}

impl AddMemberRequest {
    /// Creates a request in which `actor` adds `user` to the project.
    #[must_use]
    pub const fn new(project_id: ProjectId, actor: UserId, user: UserId) -> Self {
        Self {
            project_id,
            actor,
            user,
        }
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The actor does not own the project.
    #[error("user {user_id} does not own project {project_id}")]
    NotProjectOwner {
        /// Project targeted by the request.
        project_id: ProjectId,
        /// Requesting user.
        user_id: UserId,
    },
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project creation and membership orchestration service.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project owned by the requesting user.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the name is invalid or the
    /// repository rejects persistence.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let CreateProjectRequest { name, owner } = request;
        let project = Project::new(ProjectName::new(name)?, owner, &*self.clock);
        self.repository.store(&project).await?;
        info!(project_id = %project.id(), owner = %owner, "project created");
        Ok(project)
    }

    /// Adds a collaborator to a project.
    ///
    /// Only the project owner may add collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] for unknown projects,
    /// [`ProjectServiceError::NotProjectOwner`] when the actor is not the
    /// owner, and [`ProjectServiceError::Domain`] when the user is the owner
    /// or already a member.
    pub async fn add_member(&self, request: AddMemberRequest) -> ProjectServiceResult<Project> {
        let AddMemberRequest {
            project_id,
            actor,
            user,
        } = request;
        let mut project = self
            .repository
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))?;

        if project.created_by() != actor {
            warn!(project_id = %project_id, actor = %actor, "member addition denied");
            return Err(ProjectServiceError::NotProjectOwner {
                project_id,
                user_id: actor,
            });
        }

        project.add_member(user, &*self.clock)?;
        self.repository.insert_member(&project, user).await?;
        info!(project_id = %project_id, member = %user, "member added");
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, project_id: ProjectId) -> ProjectServiceResult<Option<Project>> {
        Ok(self.repository.find_by_id(project_id).await?)
    }
}
