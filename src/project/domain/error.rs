//! Error types for project domain validation.

use super::{ProjectId, UserId};
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the storage limit.
    #[error("project name exceeds {max} characters: {actual}")]
    ProjectNameTooLong {
        /// Maximum permitted length.
        max: usize,
        /// Length of the rejected name.
        actual: usize,
    },

    /// The project owner was proposed as a collaborator.
    #[error("owner of project {0} cannot be added as a member")]
    OwnerCannotBeMember(ProjectId),

    /// The user already belongs to the project.
    #[error("user {user_id} is already a member of project {project_id}")]
    AlreadyMember {
        /// Project being joined.
        project_id: ProjectId,
        /// User already present.
        user_id: UserId,
    },
}
