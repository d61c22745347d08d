//! Task lifecycle contract consumed by the transport-facing handler.

use super::{Interrupted, OperationContext, TaskRepositoryError, ValidationError};
use crate::task::domain::{Task, TaskId, TaskRequest, UserId};
use async_trait::async_trait;
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Request validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The task does not exist or belongs to another user.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Storage rejected the operation or is unavailable.
    #[error(transparent)]
    Persistence(TaskRepositoryError),

    /// The caller's deadline elapsed or the caller cancelled.
    #[error(transparent)]
    Interrupted(#[from] Interrupted),

    /// The operation is not provided by this implementation.
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::Interrupted(reason) => Self::Interrupted(reason),
            other @ TaskRepositoryError::Persistence(_) => Self::Persistence(other),
        }
    }
}

/// Result type for task lifecycle operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Operations available on a user's tasks.
///
/// `owner` is always the identity produced by the identity resolver, never a
/// value taken from the request.
#[async_trait]
pub trait TaskLifecycle: Send + Sync {
    /// Creates a task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for invalid input and
    /// [`TaskLifecycleError::Persistence`] when storage rejects the write.
    async fn create_task(
        &self,
        ctx: &OperationContext,
        request: TaskRequest,
        owner: UserId,
    ) -> TaskLifecycleResult<Task>;

    /// Overwrites the title and, when supplied, the description of one of
    /// `owner`'s tasks, preserving every other field.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when `id` does not resolve
    /// to a task owned by `owner`.
    async fn update_task(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        request: TaskRequest,
        owner: UserId,
    ) -> TaskLifecycleResult<Task>;

    /// Returns one of `owner`'s tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is missing or
    /// owned by another user.
    async fn find_task_by_id(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
    ) -> TaskLifecycleResult<Task>;

    /// Returns all of `owner`'s tasks. An empty list is a valid result.
    async fn find_all_tasks(
        &self,
        ctx: &OperationContext,
        owner: UserId,
    ) -> TaskLifecycleResult<Vec<Task>>;

    /// Deletes one of `owner`'s tasks.
    ///
    /// # Errors
    ///
    /// The default body reports [`TaskLifecycleError::NotImplemented`].
    async fn delete_task(
        &self,
        _ctx: &OperationContext,
        _id: TaskId,
        _owner: UserId,
    ) -> TaskLifecycleResult<()> {
        Err(TaskLifecycleError::NotImplemented("delete_task"))
    }

    /// Sets the completion flag of one of `owner`'s tasks.
    ///
    /// # Errors
    ///
    /// The default body reports [`TaskLifecycleError::NotImplemented`].
    async fn update_task_status(
        &self,
        _ctx: &OperationContext,
        _id: TaskId,
        _completed: bool,
        _owner: UserId,
    ) -> TaskLifecycleResult<Task> {
        Err(TaskLifecycleError::NotImplemented("update_task_status"))
    }
}
