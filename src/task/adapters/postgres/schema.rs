//! Diesel schema for task persistence.

diesel::table! {
    /// Kanban task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional size estimate.
        #[max_length = 8]
        size -> Nullable<Varchar>,
        /// Optional assignee.
        assignee -> Nullable<Uuid>,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Validation timestamp, set only while validated.
        validated_at -> Nullable<Timestamptz>,
        /// Validating user, set only while validated.
        validated_by -> Nullable<Uuid>,
        /// Creating user.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
