//! Repository port for task persistence and lookup.

use super::{Interrupted, OperationContext};
use crate::task::domain::{NewTask, Task, TaskId, TaskPatch, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations propagate storage failures as
/// [`TaskRepositoryError::Persistence`] and never retry.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its storage-assigned
    /// identifier.
    async fn save(&self, ctx: &OperationContext, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Applies `patch` to the task identified by `id` and owned by `owner`
    /// as a single conditional write, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with that
    /// identifier belongs to `owner`.
    async fn update_by_id(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
        patch: &TaskPatch,
    ) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn find_by_id(&self, ctx: &OperationContext, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Returns every task owned by `owner`, ordered by identifier.
    async fn find_all_by_owner(
        &self,
        ctx: &OperationContext,
        owner: UserId,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes the task identified by `id` and owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with that
    /// identifier belongs to `owner`.
    async fn delete_by_id(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),

    /// The caller's context fired before the write committed; any work
    /// already done was rolled back.
    #[error("storage call interrupted: {0}")]
    Interrupted(#[from] Interrupted),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
