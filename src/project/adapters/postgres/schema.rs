//! Diesel schema for project persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Internal project identifier.
        id -> Uuid,
        /// Human-readable project name.
        #[max_length = 200]
        name -> Varchar,
        /// User who created and owns the project.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Collaborators who joined a project.
    project_members (project_id, user_id) {
        /// Project joined.
        project_id -> Uuid,
        /// Collaborating user.
        user_id -> Uuid,
    }
}

diesel::joinable!(project_members -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, project_members);
