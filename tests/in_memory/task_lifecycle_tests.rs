//! In-memory integration tests for task lifecycle operations.

use std::sync::Arc;

use crate::in_memory::helpers::{MemoryService, service, user};
use eyre::{Result, ensure};
use rstest::rstest;
use tasktrack::task::{
    domain::TaskRequest,
    ports::{OperationContext, TaskLifecycle, TaskLifecycleError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_update_find_preserves_untouched_fields(service: MemoryService) -> Result<()> {
    let ctx = OperationContext::new();
    let created = service
        .create_task(
            &ctx,
            TaskRequest::new("Buy milk").with_description("2%"),
            user(42),
        )
        .await?;

    service
        .update_task(&ctx, created.id(), TaskRequest::new("Buy milk and eggs"), user(42))
        .await?;
    let fetched = service.find_task_by_id(&ctx, created.id(), user(42)).await?;

    ensure!(fetched.title() == "Buy milk and eggs", "title was not updated");
    ensure!(fetched.description() == "2%", "description was not preserved");
    ensure!(fetched.completed() == created.completed(), "completion changed");
    ensure!(fetched.created_at() == created.created_at(), "creation time changed");
    ensure!(fetched.user_id() == user(42), "owner changed");
    ensure!(fetched.updated_at().is_some(), "update time not recorded");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_are_assigned_in_creation_order(service: MemoryService) -> Result<()> {
    let ctx = OperationContext::new();
    let first = service
        .create_task(&ctx, TaskRequest::new("First"), user(42))
        .await?;
    let second = service
        .create_task(&ctx, TaskRequest::new("Second"), user(43))
        .await?;

    ensure!(first.id() < second.id(), "identifiers are not increasing");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_cannot_reach_each_others_tasks(service: MemoryService) -> Result<()> {
    let ctx = OperationContext::new();
    let mine = service
        .create_task(&ctx, TaskRequest::new("Private"), user(42))
        .await?;

    let read = service.find_task_by_id(&ctx, mine.id(), user(43)).await;
    let status = service
        .update_task_status(&ctx, mine.id(), true, user(43))
        .await;
    let delete = service.delete_task(&ctx, mine.id(), user(43)).await;

    ensure!(matches!(read, Err(TaskLifecycleError::NotFound(_))), "read leaked");
    ensure!(matches!(status, Err(TaskLifecycleError::NotFound(_))), "status leaked");
    ensure!(matches!(delete, Err(TaskLifecycleError::NotFound(_))), "delete leaked");

    let unchanged = service.find_task_by_id(&ctx, mine.id(), user(42)).await?;
    ensure!(unchanged == mine, "foreign calls mutated the task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_can_be_toggled_back(service: MemoryService) -> Result<()> {
    let ctx = OperationContext::new();
    let created = service
        .create_task(&ctx, TaskRequest::new("Water plants"), user(42))
        .await?;

    let done = service
        .update_task_status(&ctx, created.id(), true, user(42))
        .await?;
    let reopened = service
        .update_task_status(&ctx, created.id(), false, user(42))
        .await?;

    ensure!(done.completed(), "task was not completed");
    ensure!(!reopened.completed(), "task was not reopened");
    ensure!(reopened.completed_at() == created.completed_at(), "marker moved");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_all_persist(service: MemoryService) -> Result<()> {
    let shared = Arc::new(service);
    let handles: Vec<_> = (0..16)
        .map(|n| {
            let worker = Arc::clone(&shared);
            tokio::spawn(async move {
                worker
                    .create_task(
                        &OperationContext::new(),
                        TaskRequest::new(format!("Task {n}")),
                        user(42),
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let all = shared
        .find_all_tasks(&OperationContext::new(), user(42))
        .await?;
    ensure!(all.len() == 16, "expected 16 tasks, found {}", all.len());
    Ok(())
}
