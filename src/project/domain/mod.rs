//! Domain model for projects and their members.

mod error;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use ids::{ProjectId, ProjectName, UserId};
pub use project::{ActorRole, PersistedProjectData, Project};
