//! Service layer for per-user task management.

use crate::config::TaskConfig;
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPatch, TaskRequest, UserId},
    ports::{
        OperationContext, TaskLifecycle, TaskLifecycleError, TaskLifecycleResult, TaskRepository,
        TaskRequestValidator,
    },
    validation::DefaultTaskValidator,
};
use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Offset from creation to the completion marker when none is configured.
pub const DEFAULT_COMPLETION_WINDOW: Duration = Duration::from_secs(3600);

/// Task lifecycle orchestration service.
///
/// Validates requests, stamps timestamps from the injected clock, and
/// bounds every storage call by the caller's [`OperationContext`].
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    validator: Arc<dyn TaskRequestValidator>,
    clock: Arc<C>,
    completion_window: TimeDelta,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default validator and completion window.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            validator: Arc::new(DefaultTaskValidator::new()),
            clock,
            completion_window: saturating_delta(DEFAULT_COMPLETION_WINDOW),
        }
    }

    /// Creates a service using the limits and completion window from the
    /// `[tasks]` configuration section.
    #[must_use]
    pub fn from_config(repository: Arc<R>, clock: Arc<C>, config: &TaskConfig) -> Self {
        Self::new(repository, clock)
            .with_validator(Arc::new(DefaultTaskValidator::with_config(
                config.validation(),
            )))
            .with_completion_window(config.completion_window())
    }

    /// Replaces the request validator.
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn TaskRequestValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Sets the offset from creation to the completion marker.
    ///
    /// Windows beyond the representable range saturate.
    #[must_use]
    pub fn with_completion_window(mut self, window: Duration) -> Self {
        self.completion_window = saturating_delta(window);
        self
    }

    /// Returns the completion window.
    #[must_use]
    pub const fn completion_window(&self) -> TimeDelta {
        self.completion_window
    }
}

fn saturating_delta(window: Duration) -> TimeDelta {
    TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX)
}

#[async_trait]
impl<R, C> TaskLifecycle for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    async fn create_task(
        &self,
        ctx: &OperationContext,
        request: TaskRequest,
        owner: UserId,
    ) -> TaskLifecycleResult<Task> {
        let validated = self.validator.validate(request)?;
        let new_task = NewTask::new(owner, validated, self.completion_window, &*self.clock);
        let task = ctx.run(self.repository.save(ctx, &new_task)).await??;
        tracing::info!(task_id = %task.id(), user_id = %owner, "task created");
        Ok(task)
    }

    async fn update_task(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        request: TaskRequest,
        owner: UserId,
    ) -> TaskLifecycleResult<Task> {
        let validated = self.validator.validate(request)?;
        let patch = TaskPatch::from_request(validated, &*self.clock);
        let task = ctx
            .run(self.repository.update_by_id(ctx, id, owner, &patch))
            .await??;
        tracing::info!(task_id = %id, user_id = %owner, "task updated");
        Ok(task)
    }

    async fn find_task_by_id(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
    ) -> TaskLifecycleResult<Task> {
        let task = ctx.run(self.repository.find_by_id(ctx, id)).await??;
        if !task.is_owned_by(owner) {
            tracing::debug!(task_id = %id, user_id = %owner, "task owned by another user");
            return Err(TaskLifecycleError::NotFound(id));
        }
        Ok(task)
    }

    async fn find_all_tasks(
        &self,
        ctx: &OperationContext,
        owner: UserId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(ctx
            .run(self.repository.find_all_by_owner(ctx, owner))
            .await??)
    }

    async fn delete_task(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
    ) -> TaskLifecycleResult<()> {
        ctx.run(self.repository.delete_by_id(ctx, id, owner))
            .await??;
        tracing::info!(task_id = %id, user_id = %owner, "task deleted");
        Ok(())
    }

    async fn update_task_status(
        &self,
        ctx: &OperationContext,
        id: TaskId,
        completed: bool,
        owner: UserId,
    ) -> TaskLifecycleResult<Task> {
        let patch = TaskPatch::status(completed, &*self.clock);
        let task = ctx
            .run(self.repository.update_by_id(ctx, id, owner, &patch))
            .await??;
        tracing::info!(task_id = %id, user_id = %owner, completed, "task status changed");
        Ok(task)
    }
}
