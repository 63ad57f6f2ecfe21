//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional size estimate.
    pub size: Option<String>,
    /// Optional assignee.
    pub assignee: Option<uuid::Uuid>,
    /// Workflow status.
    pub status: String,
    /// Validation timestamp.
    pub validated_at: Option<DateTime<Utc>>,
    /// Validating user.
    pub validated_by: Option<uuid::Uuid>,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional size estimate.
    pub size: Option<String>,
    /// Optional assignee.
    pub assignee: Option<uuid::Uuid>,
    /// Workflow status.
    pub status: String,
    /// Validation timestamp.
    pub validated_at: Option<DateTime<Utc>>,
    /// Validating user.
    pub validated_by: Option<uuid::Uuid>,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for workflow moves.
///
/// `treat_none_as_null` makes updates clear validation columns when the
/// task leaves `VALIDATED`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskStatusChangeset {
    /// Workflow status.
    pub status: String,
    /// Validation timestamp.
    pub validated_at: Option<DateTime<Utc>>,
    /// Validating user.
    pub validated_by: Option<uuid::Uuid>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for descriptive edits.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskDetailsChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional size estimate.
    pub size: Option<String>,
    /// Optional assignee.
    pub assignee: Option<uuid::Uuid>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
