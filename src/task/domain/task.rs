//! Task domain objects: the unsaved task, the persisted task, and the patch
//! applied by mutating operations.

use super::{TaskId, TaskRequest, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A task that has been built from a request but not yet persisted.
///
/// The owner is always the authenticated caller; request payloads cannot
/// influence it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    user_id: UserId,
    title: String,
    description: String,
    completed: bool,
    completed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Builds a new, incomplete task owned by `owner`.
    ///
    /// `completed_at` is placed `completion_window` after creation. A window
    /// that would overflow the timestamp range saturates at the maximum
    /// representable instant.
    #[must_use]
    pub fn new(
        owner: UserId,
        request: TaskRequest,
        completion_window: TimeDelta,
        clock: &impl Clock,
    ) -> Self {
        let created_at = clock.utc();
        let completed_at = created_at
            .checked_add_signed(completion_window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let (title, description) = request.into_parts();

        Self {
            user_id: owner,
            title,
            description: description.unwrap_or_default(),
            completed: false,
            completed_at,
            created_at,
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the task is complete.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the completion marker.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the storage-assigned identifier, producing the persisted
    /// form of this task.
    #[must_use]
    pub fn into_persisted(self, id: TaskId) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: None,
        })
    }
}

/// A persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "taskID")]
    id: TaskId,
    #[serde(rename = "userID")]
    user_id: UserId,
    title: String,
    description: String,
    completed: bool,
    completed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Storage-assigned identifier.
    pub id: TaskId,
    /// Owning user.
    pub user_id: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted completion marker.
    pub completed_at: DateTime<Utc>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the latest mutation, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            completed: data.completed,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns `true` when `user` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.user_id == user
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the task is complete.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the completion marker.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest mutation, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Merges a patch onto this task.
    ///
    /// Only the fields present in the patch change; identity, ownership,
    /// the completion marker and the creation time never do.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = patch.title() {
            title.clone_into(&mut self.title);
        }
        if let Some(description) = patch.description() {
            description.clone_into(&mut self.description);
        }
        if let Some(completed) = patch.completed() {
            self.completed = completed;
        }
        self.updated_at = Some(patch.updated_at());
    }
}

/// Fields overwritten by a mutating operation.
///
/// Absent fields are preserved from the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
    updated_at: DateTime<Utc>,
}

impl TaskPatch {
    /// Builds the patch for a content update from a validated request.
    ///
    /// The title is always overwritten; the description only when the
    /// request carries one.
    #[must_use]
    pub fn from_request(request: TaskRequest, clock: &impl Clock) -> Self {
        let (title, description) = request.into_parts();
        Self {
            title: Some(title),
            description,
            completed: None,
            updated_at: clock.utc(),
        }
    }

    /// Builds the patch for a completion-status change.
    #[must_use]
    pub fn status(completed: bool, clock: &impl Clock) -> Self {
        Self {
            title: None,
            description: None,
            completed: Some(completed),
            updated_at: clock.utc(),
        }
    }

    /// Returns the replacement title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the replacement description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the replacement completion flag, if any.
    #[must_use]
    pub const fn completed(&self) -> Option<bool> {
        self.completed
    }

    /// Returns the mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
