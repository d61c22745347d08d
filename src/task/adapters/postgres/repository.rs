//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    pool::TaskPgPool,
    schema::tasks,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskPatch, UserId},
    ports::{OperationContext, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::time::Duration;

/// `PostgreSQL`-backed task repository.
///
/// Every call checks a connection out of the shared pool on the blocking
/// thread pool and runs inside a transaction. The caller's context travels
/// into the blocking closure: the checkout and the `statement_timeout` are
/// bounded by whatever time is left at each step, and the transaction rolls
/// back if the context was cancelled or ran out of time before commit.
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

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &TaskPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, ctx: &OperationContext, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let scope = ctx.clone();
        tokio::task::spawn_blocking(move || {
            let mut pooled = statement_budget(&scope)?
                .map_or_else(|| pool.get(), |timeout| pool.get_timeout(timeout))
                .map_err(TaskRepositoryError::persistence)?;
            let connection: &mut PgConnection = &mut pooled;
            connection.transaction(|tx| {
                if let Some(timeout) = statement_budget(&scope)? {
                    apply_statement_timeout(tx, timeout)?;
                }
                let output = f(tx)?;
                commit_gate(&scope, output)
            })
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

/// Returns the time left for the next storage step, failing when the
/// context is already cancelled or out of time.
fn statement_budget(scope: &OperationContext) -> TaskRepositoryResult<Option<Duration>> {
    scope.check()?;
    Ok(scope.remaining())
}

/// Passes `output` through only while the context is still live. An error
/// here makes the enclosing transaction roll back.
fn commit_gate<T>(scope: &OperationContext, output: T) -> TaskRepositoryResult<T> {
    scope.check()?;
    Ok(output)
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn save(&self, ctx: &OperationContext, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        self.run_blocking(ctx, move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)?;
            row_to_task(row)
        })
        .await
    }

    async fn update_by_id(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
        patch: &TaskPatch,
    ) -> TaskRepositoryResult<Task> {
        let changeset = to_changeset(patch);
        self.run_blocking(ctx, move |connection| {
            let row = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::user_id.eq(owner.value())),
            )
            .set(&changeset)
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()?
            .ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, ctx: &OperationContext, id: TaskId) -> TaskRepositoryResult<Task> {
        self.run_blocking(ctx, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn find_all_by_owner(
        &self,
        ctx: &OperationContext,
        owner: UserId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(ctx, move |connection| {
            tasks::table
                .filter(tasks::user_id.eq(owner.value()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn delete_by_id(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
    ) -> TaskRepositoryResult<()> {
        self.run_blocking(ctx, move |connection| {
            let deleted = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::user_id.eq(owner.value())),
            )
            .execute(connection)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Bounds every statement in the current transaction by `timeout`.
fn apply_statement_timeout(
    connection: &mut PgConnection,
    timeout: Duration,
) -> TaskRepositoryResult<()> {
    // A zero timeout disables the limit in PostgreSQL, so round up to 1 ms.
    let millis = timeout.as_millis().max(1);
    diesel::sql_query(format!("SET LOCAL statement_timeout = {millis}")).execute(connection)?;
    Ok(())
}

pub(super) fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        user_id: task.user_id().value(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        completed: task.completed(),
        completed_at: task.completed_at(),
        created_at: task.created_at(),
    }
}

pub(super) fn to_changeset(patch: &TaskPatch) -> TaskChangeset {
    TaskChangeset {
        title: patch.title().map(str::to_owned),
        description: patch.description().map(str::to_owned),
        completed: patch.completed(),
        updated_at: patch.updated_at(),
    }
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        user_id,
        title,
        description,
        completed,
        completed_at,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id).map_err(TaskRepositoryError::persistence)?,
        user_id: UserId::new(user_id).map_err(TaskRepositoryError::persistence)?,
        title,
        description,
        completed,
        completed_at,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
