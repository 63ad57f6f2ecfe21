//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{NewProjectRow, ProjectMemberRow, ProjectRow},
    schema::{project_members, projects},
};
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId, ProjectName, UserId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by project adapters.
pub type ProjectPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ProjectPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_new_row(project);
        let member_rows = to_member_rows(project);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|conn| {
                    diesel::insert_into(projects::table)
                        .values(&new_row)
                        .execute(conn)?;
                    if !member_rows.is_empty() {
                        diesel::insert_into(project_members::table)
                            .values(&member_rows)
                            .execute(conn)?;
                    }
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn insert_member(&self, project: &Project, user: UserId) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let updated_at = project.updated_at();
        let member_row = ProjectMemberRow {
            project_id: project_id.into_inner(),
            user_id: user.into_inner(),
        };

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|conn| {
                    let updated = diesel::update(projects::table.find(member_row.project_id))
                        .set(projects::updated_at.eq(updated_at))
                        .execute(conn)?;
                    if updated == 0 {
                        return Err(DieselError::NotFound);
                    }
                    diesel::insert_into(project_members::table)
                        .values(&member_row)
                        .execute(conn)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::NotFound
                    | DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        ProjectRepositoryError::NotFound(project_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateMember {
                            project_id,
                            user_id: user,
                        }
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            let Some(project_row) = row else {
                return Ok(None);
            };

            let member_ids = project_members::table
                .filter(project_members::project_id.eq(project_row.id))
                .select(project_members::user_id)
                .load::<uuid::Uuid>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            row_to_project(project_row, member_ids).map(Some)
        })
        .await
    }
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        created_by: project.created_by().into_inner(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn to_member_rows(project: &Project) -> Vec<ProjectMemberRow> {
    let project_id = project.id().into_inner();
    project
        .members()
        .iter()
        .map(|user| ProjectMemberRow {
            project_id,
            user_id: user.into_inner(),
        })
        .collect()
}

fn row_to_project(
    row: ProjectRow,
    member_ids: Vec<uuid::Uuid>,
) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name: persisted_name,
        created_by,
        created_at,
        updated_at,
    } = row;

    let name = ProjectName::new(persisted_name).map_err(ProjectRepositoryError::persistence)?;
    let data = PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name,
        created_by: UserId::from_uuid(created_by),
        members: member_ids.into_iter().map(UserId::from_uuid).collect(),
        created_at,
        updated_at,
    };
    Ok(Project::from_persisted(data))
}
