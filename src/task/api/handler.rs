//! Transport-agnostic request handling.
//!
//! A router maps method and path onto one [`TaskHandler`] operation and
//! passes the raw `Authorization` header value, the raw path segment and
//! the raw body bytes. The handler resolves the caller, decodes input,
//! invokes the lifecycle and wraps every outcome in a [`ResponseEnvelope`].
//! No outcome panics.

use super::envelope::{EnvelopeBuilder, ResponseEnvelope};
use crate::task::{
    domain::{Task, TaskId, TaskRequest, TaskStatusRequest, UserId},
    ports::{
        IdentityResolver, OperationContext, TaskLifecycle, TaskLifecycleError, ValidationError,
    },
};
use http::StatusCode;
use mockable::Clock;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Header carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Field reported when the request body cannot be decoded.
pub const BODY_FIELD: &str = "body";

/// Field reported when the path identifier cannot be decoded.
pub const TASK_ID_FIELD: &str = "task_id";

const CREATED_MESSAGE: &str = "task created successfully";
const UPDATED_MESSAGE: &str = "task updated successfully";
const FOUND_MESSAGE: &str = "task retrieved successfully";
const LISTED_MESSAGE: &str = "tasks retrieved successfully";
const DELETED_MESSAGE: &str = "task deleted successfully";
const STATUS_MESSAGE: &str = "task status updated successfully";

/// Entry point for task operations.
pub struct TaskHandler<L, I, C>
where
    L: TaskLifecycle,
    I: IdentityResolver,
    C: Clock + Send + Sync,
{
    lifecycle: Arc<L>,
    identity: Arc<I>,
    envelopes: EnvelopeBuilder<C>,
}

impl<L, I, C> TaskHandler<L, I, C>
where
    L: TaskLifecycle,
    I: IdentityResolver,
    C: Clock + Send + Sync,
{
    /// Creates a handler over the given lifecycle and identity resolver.
    #[must_use]
    pub const fn new(lifecycle: Arc<L>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            lifecycle,
            identity,
            envelopes: EnvelopeBuilder::new(clock),
        }
    }

    /// Creates a task owned by the caller. Responds `201 Created`.
    pub async fn create(
        &self,
        ctx: &OperationContext,
        authorization: Option<&str>,
        body: &[u8],
    ) -> ResponseEnvelope<Task> {
        let Some(owner) = self.authenticate(authorization).await else {
            return self.envelopes.unauthorized();
        };
        let result = match decode_body::<TaskRequest>(body) {
            Ok(request) => self.lifecycle.create_task(ctx, request, owner).await,
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(task) => {
                tracing::info!(task_id = %task.id(), user_id = %owner, "create succeeded");
                self.envelopes.success(
                    StatusCode::CREATED,
                    task.id(),
                    owner,
                    CREATED_MESSAGE,
                    task,
                )
            }
            Err(err) => self.reject("create", owner, &err),
        }
    }

    /// Overwrites the title and, when supplied, the description of one of
    /// the caller's tasks.
    pub async fn update(
        &self,
        ctx: &OperationContext,
        authorization: Option<&str>,
        task_id: &str,
        body: &[u8],
    ) -> ResponseEnvelope<Task> {
        let Some(owner) = self.authenticate(authorization).await else {
            return self.envelopes.unauthorized();
        };
        let result = match (parse_task_id(task_id), decode_body::<TaskRequest>(body)) {
            (Ok(id), Ok(request)) => self.lifecycle.update_task(ctx, id, request, owner).await,
            (Err(err), _) | (_, Err(err)) => Err(err.into()),
        };
        self.single("update", owner, UPDATED_MESSAGE, result)
    }

    /// Returns one of the caller's tasks.
    pub async fn find_by_id(
        &self,
        ctx: &OperationContext,
        authorization: Option<&str>,
        task_id: &str,
    ) -> ResponseEnvelope<Task> {
        let Some(owner) = self.authenticate(authorization).await else {
            return self.envelopes.unauthorized();
        };
        let result = match parse_task_id(task_id) {
            Ok(id) => self.lifecycle.find_task_by_id(ctx, id, owner).await,
            Err(err) => Err(err.into()),
        };
        self.single("find_by_id", owner, FOUND_MESSAGE, result)
    }

    /// Returns every task the caller owns together with the count.
    pub async fn find_all(
        &self,
        ctx: &OperationContext,
        authorization: Option<&str>,
    ) -> ResponseEnvelope<Task> {
        let Some(owner) = self.authenticate(authorization).await else {
            return self.envelopes.unauthorized();
        };
        match self.lifecycle.find_all_tasks(ctx, owner).await {
            Ok(tasks) => {
                tracing::info!(user_id = %owner, count = tasks.len(), "find_all succeeded");
                self.envelopes.collection(owner, LISTED_MESSAGE, tasks)
            }
            Err(err) => self.reject("find_all", owner, &err),
        }
    }

    /// Deletes one of the caller's tasks. The envelope data is the deleted
    /// identifier.
    pub async fn delete(
        &self,
        ctx: &OperationContext,
        authorization: Option<&str>,
        task_id: &str,
    ) -> ResponseEnvelope<TaskId> {
        let Some(owner) = self.authenticate(authorization).await else {
            return self.envelopes.unauthorized();
        };
        let result = match parse_task_id(task_id) {
            Ok(id) => self.lifecycle.delete_task(ctx, id, owner).await.map(|()| id),
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(id) => {
                tracing::info!(task_id = %id, user_id = %owner, "delete succeeded");
                self.envelopes.success(
                    StatusCode::OK,
                    id,
                    owner,
                    DELETED_MESSAGE,
                    id,
                )
            }
            Err(err) => self.reject("delete", owner, &err),
        }
    }

    /// Sets the completion flag of one of the caller's tasks from a
    /// `{"completed": bool}` body.
    pub async fn update_status(
        &self,
        ctx: &OperationContext,
        authorization: Option<&str>,
        task_id: &str,
        body: &[u8],
    ) -> ResponseEnvelope<Task> {
        let Some(owner) = self.authenticate(authorization).await else {
            return self.envelopes.unauthorized();
        };
        let result = match (parse_task_id(task_id), decode_body::<TaskStatusRequest>(body)) {
            (Ok(id), Ok(status)) => {
                self.lifecycle
                    .update_task_status(ctx, id, status.completed, owner)
                    .await
            }
            (Err(err), _) | (_, Err(err)) => Err(err.into()),
        };
        self.single("update_status", owner, STATUS_MESSAGE, result)
    }

    async fn authenticate(&self, authorization: Option<&str>) -> Option<UserId> {
        let Some(credential) = authorization else {
            tracing::debug!(header = AUTHORIZATION_HEADER, "credential missing");
            return None;
        };
        let user = self.identity.resolve(credential).await.user_id();
        if user.is_none() {
            tracing::debug!(header = AUTHORIZATION_HEADER, "credential rejected");
        }
        user
    }

    fn single(
        &self,
        operation: &'static str,
        owner: UserId,
        message: &'static str,
        result: Result<Task, TaskLifecycleError>,
    ) -> ResponseEnvelope<Task> {
        match result {
            Ok(task) => {
                tracing::info!(operation, task_id = %task.id(), user_id = %owner, "succeeded");
                self.envelopes.success(
                    StatusCode::OK,
                    task.id(),
                    owner,
                    message,
                    task,
                )
            }
            Err(err) => self.reject(operation, owner, &err),
        }
    }

    fn reject<T>(
        &self,
        operation: &'static str,
        owner: UserId,
        err: &TaskLifecycleError,
    ) -> ResponseEnvelope<T> {
        let envelope = self.envelopes.failure(err);
        let status = envelope.status_code();
        if status.is_server_error() {
            tracing::error!(
                operation,
                user_id = %owner,
                status = status.as_u16(),
                error = %err,
                "operation failed"
            );
        } else {
            tracing::warn!(
                operation,
                user_id = %owner,
                status = status.as_u16(),
                error = %err,
                "operation rejected"
            );
        }
        envelope
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    serde_json::from_slice(body)
        .map_err(|err| ValidationError::malformed(BODY_FIELD, err.to_string()))
}

fn parse_task_id(raw: &str) -> Result<TaskId, ValidationError> {
    raw.parse::<TaskId>()
        .map_err(|err| ValidationError::malformed(TASK_ID_FIELD, err.to_string()))
}
