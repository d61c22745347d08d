//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPatch, UserId},
    ports::{OperationContext, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a monotonically increasing counter
/// starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    last_id: i64,
    tasks: BTreeMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks across all owners.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        Ok(self.read()?.tasks.len())
    }

    /// Returns `true` when no tasks are stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.read()?.tasks.is_empty())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Looks up a task that belongs to `owner`, treating foreign tasks as
/// missing.
fn owned_task_mut(
    state: &mut InMemoryTaskState,
    id: TaskId,
    owner: UserId,
) -> TaskRepositoryResult<&mut Task> {
    state
        .tasks
        .get_mut(&id)
        .filter(|task| task.is_owned_by(owner))
        .ok_or(TaskRepositoryError::NotFound(id))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, _ctx: &OperationContext, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let next_id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| {
                TaskRepositoryError::persistence(std::io::Error::other("task id space exhausted"))
            })
            .and_then(|value| TaskId::new(value).map_err(TaskRepositoryError::persistence))?;

        let persisted = task.clone().into_persisted(next_id);
        state.last_id = next_id.value();
        state.tasks.insert(next_id, persisted.clone());
        Ok(persisted)
    }

    async fn update_by_id(
        &self,
        _ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
        patch: &TaskPatch,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let task = owned_task_mut(&mut state, id, owner)?;
        task.apply_patch(patch);
        Ok(task.clone())
    }

    async fn find_by_id(&self, _ctx: &OperationContext, id: TaskId) -> TaskRepositoryResult<Task> {
        let state = self.read()?;
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_all_by_owner(
        &self,
        _ctx: &OperationContext,
        owner: UserId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn delete_by_id(
        &self,
        _ctx: &OperationContext,
        id: TaskId,
        owner: UserId,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        owned_task_mut(&mut state, id, owner)?;
        state.tasks.remove(&id);
        Ok(())
    }
}
