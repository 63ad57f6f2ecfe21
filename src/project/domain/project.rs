//! Project aggregate root and actor roles.

use super::{ProjectDomainError, ProjectId, ProjectName, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Role a user holds on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// The user who created the project.
    Owner,
    /// A user who joined the project.
    Collaborator,
}

impl ActorRole {
    /// Returns `true` for [`ActorRole::Owner`].
    #[must_use]
    pub const fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Collaborator => "collaborator",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    created_by: UserId,
    members: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: ProjectName,
    /// Persisted owner.
    pub created_by: UserId,
    /// Persisted collaborators.
    pub members: BTreeSet<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project owned by `owner` with no collaborators.
    #[must_use]
    pub fn new(name: ProjectName, owner: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            name,
            created_by: owner,
            members: BTreeSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    ///
    /// An owner listed among the members is dropped from the member set.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        let PersistedProjectData {
            id,
            name,
            created_by,
            mut members,
            created_at,
            updated_at,
        } = data;
        members.remove(&created_by);
        Self {
            id,
            name,
            created_by,
            members,
            created_at,
            updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the owner.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the collaborators, excluding the owner.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<UserId> {
        &self.members
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

    /// Resolves the role `user` holds on this project.
    ///
    /// Returns `None` when the user neither owns nor belongs to the project.
    #[must_use]
    pub fn role_of(&self, user: UserId) -> Option<ActorRole> {
        if self.created_by == user {
            Some(ActorRole::Owner)
        } else if self.members.contains(&user) {
            Some(ActorRole::Collaborator)
        } else {
            None
        }
    }

    /// Adds a collaborator to the project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::OwnerCannotBeMember`] when `user` owns
    /// the project, or [`ProjectDomainError::AlreadyMember`] when the user
    /// already belongs to it.
    pub fn add_member(
        &mut self,
        user: UserId,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if self.created_by == user {
            return Err(ProjectDomainError::OwnerCannotBeMember(self.id));
        }
        if !self.members.insert(user) {
            return Err(ProjectDomainError::AlreadyMember {
                project_id: self.id,
                user_id: user,
            });
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}
