//! Services orchestrating project creation and membership.

mod membership;

pub use membership::{
    AddMemberRequest, CreateProjectRequest, ProjectService, ProjectServiceError,
    ProjectServiceResult,
};
