//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskDetailsChangeset, TaskRow, TaskStatusChangeset},
    schema::tasks,
};
use crate::project::domain::{ProjectId, UserId};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskDescription, TaskId, TaskSize, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::workflow::TaskStatus;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_status(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = to_status_changeset(task);

        self.run_blocking(move |connection| {
            // Status and validation columns move together, guarded by the
            // status the decision was taken on.
            let updated = diesel::update(
                tasks::table
                    .find(task_id.into_inner())
                    .filter(tasks::status.eq(expected.as_str())),
            )
            .set(&changes)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            ensure_written(connection, task_id, updated)
        })
        .await
    }

    async fn update_details(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = to_details_changeset(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table
                    .find(task_id.into_inner())
                    .filter(tasks::status.ne(TaskStatus::Validated.as_str())),
            )
            .set(&changes)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            ensure_written(connection, task_id, updated)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(|d| d.as_str().to_owned()),
        size: task.size().map(|size| size.as_str().to_owned()),
        assignee: task.assignee().map(UserId::into_inner),
        status: task.status().as_str().to_owned(),
        validated_at: task.validated_at(),
        validated_by: task.validated_by().map(UserId::into_inner),
        created_by: task.created_by().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_status_changeset(task: &Task) -> TaskStatusChangeset {
    TaskStatusChangeset {
        status: task.status().as_str().to_owned(),
        validated_at: task.validated_at(),
        validated_by: task.validated_by().map(UserId::into_inner),
        updated_at: task.updated_at(),
    }
}

fn to_details_changeset(task: &Task) -> TaskDetailsChangeset {
    TaskDetailsChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(|d| d.as_str().to_owned()),
        size: task.size().map(|size| size.as_str().to_owned()),
        assignee: task.assignee().map(UserId::into_inner),
        updated_at: task.updated_at(),
    }
}

/// Tells a guarded write that matched nothing apart from a missing row.
fn ensure_written(
    connection: &mut PgConnection,
    task_id: TaskId,
    updated: usize,
) -> TaskRepositoryResult<()> {
    if updated > 0 {
        return Ok(());
    }
    let exists = diesel::select(diesel::dsl::exists(tasks::table.find(task_id.into_inner())))
        .get_result::<bool>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    if exists {
        Err(TaskRepositoryError::Conflict(task_id))
    } else {
        Err(TaskRepositoryError::NotFound(task_id))
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title: persisted_title,
        description: persisted_description,
        size: persisted_size,
        assignee,
        status: persisted_status,
        validated_at,
        validated_by,
        created_by,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title, TaskTitle::STORAGE_MAX_LENGTH)
        .map_err(TaskRepositoryError::persistence)?;
    let description = persisted_description
        .map(|text| TaskDescription::new(text, usize::MAX))
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let size = persisted_size
        .as_deref()
        .map(TaskSize::try_from)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title,
        description,
        size,
        assignee: assignee.map(UserId::from_uuid),
        status,
        validated_at,
        validated_by: validated_by.map(UserId::from_uuid),
        created_by: UserId::from_uuid(created_by),
        created_at,
        updated_at,
    };
    Task::from_persisted(data).map_err(TaskRepositoryError::persistence)
}
