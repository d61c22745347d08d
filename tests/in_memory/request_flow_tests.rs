//! End-to-end handler flows over the in-memory store.
//!
//! Requests go in as raw header values, path segments and JSON bytes; the
//! assertions read the serialized envelope the way a client would.

use crate::in_memory::helpers::{ALICE, BOB, Stack, stack};
use eyre::{OptionExt, Result, ensure};
use rstest::rstest;
use serde_json::Value;
use tasktrack::task::{
    api::{ResponseEnvelope, UNAUTHORIZED_MESSAGE},
    ports::OperationContext,
};

fn to_json<T: serde::Serialize>(envelope: &ResponseEnvelope<T>) -> Result<Value> {
    Ok(serde_json::to_value(envelope)?)
}

async fn create(stack: &Stack, authorization: Option<&str>, body: &str) -> Result<Value> {
    let envelope = stack
        .handler
        .create(&OperationContext::new(), authorization, body.as_bytes())
        .await;
    to_json(&envelope)
}

fn task_path(created: &Value) -> Result<String> {
    created["data"]["taskID"]
        .as_i64()
        .map(|id| id.to_string())
        .ok_or_eyre("created envelope carries no taskID")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_responds_created_with_callers_identity(stack: Stack) -> Result<()> {
    let created = create(&stack, ALICE, r#"{"title":"Buy milk","description":"2%"}"#).await?;

    ensure!(created["statusCode"] == 201, "unexpected status: {created}");
    ensure!(created["data"]["userID"] == 42, "wrong owner: {created}");
    ensure!(created["data"]["completed"] == false, "task created complete");
    ensure!(created["authorization"] == 42, "authorization echo missing");
    ensure!(
        created["referenceID"] == created["data"]["taskID"],
        "reference does not match the new task"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_keeps_description_when_omitted(stack: Stack) -> Result<()> {
    let created = create(&stack, ALICE, r#"{"title":"Buy milk","description":"2%"}"#).await?;
    let path = task_path(&created)?;

    let updated = stack
        .handler
        .update(
            &OperationContext::new(),
            ALICE,
            &path,
            br#"{"title":"Buy milk and eggs"}"#,
        )
        .await;
    let fetched = stack
        .handler
        .find_by_id(&OperationContext::new(), ALICE, &path)
        .await;
    let json = to_json(&fetched)?;

    ensure!(updated.is_success(), "update failed: {}", updated.message());
    ensure!(json["statusCode"] == 200, "unexpected status: {json}");
    ensure!(json["data"]["title"] == "Buy milk and eggs", "title not updated");
    ensure!(json["data"]["description"] == "2%", "description lost");
    ensure!(
        json["data"]["createdAt"] == created["data"]["createdAt"],
        "creation time changed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_returns_exactly_the_callers_tasks(stack: Stack) -> Result<()> {
    create(&stack, ALICE, r#"{"title":"Buy milk"}"#).await?;
    create(&stack, ALICE, r#"{"title":"Pay rent"}"#).await?;
    create(&stack, BOB, r#"{"title":"Walk dog"}"#).await?;

    let listed = stack
        .handler
        .find_all(&OperationContext::new(), ALICE)
        .await;
    let json = to_json(&listed)?;

    ensure!(json["count"] == 2, "unexpected count: {json}");
    let data = json["data"].as_array().ok_or_eyre("data is not an array")?;
    ensure!(data.len() == 2, "unexpected data length");
    ensure!(
        data.iter().all(|task| task["userID"] == 42),
        "foreign task listed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_requests_leave_the_store_untouched(stack: Stack) -> Result<()> {
    let created = create(&stack, ALICE, r#"{"title":"Buy milk"}"#).await?;
    let path = task_path(&created)?;
    let ctx = OperationContext::new();
    let forged = Some("Bearer forged-token");

    let attempts = [
        to_json(&stack.handler.create(&ctx, forged, br#"{"title":"x"}"#).await)?,
        to_json(&stack.handler.update(&ctx, None, &path, br#"{"title":"x"}"#).await)?,
        to_json(&stack.handler.delete(&ctx, forged, &path).await)?,
        to_json(
            &stack
                .handler
                .update_status(&ctx, forged, &path, br#"{"completed":true}"#)
                .await,
        )?,
    ];

    for attempt in &attempts {
        let object = attempt.as_object().ok_or_eyre("envelope is not an object")?;
        ensure!(object.len() == 1, "unauthorized envelope has extra keys");
        ensure!(attempt["message"] == UNAUTHORIZED_MESSAGE, "wrong message");
    }
    ensure!(stack.repository.len()? == 1, "store was mutated");

    let fetched = stack.handler.find_by_id(&ctx, ALICE, &path).await;
    let json = to_json(&fetched)?;
    ensure!(json["data"]["title"] == "Buy milk", "task was modified");
    ensure!(json["data"]["completed"] == false, "task was completed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_then_find_is_not_found(stack: Stack) -> Result<()> {
    let created = create(&stack, ALICE, r#"{"title":"Buy milk"}"#).await?;
    let path = task_path(&created)?;
    let ctx = OperationContext::new();

    let deleted = to_json(&stack.handler.delete(&ctx, ALICE, &path).await)?;
    let missing = to_json(&stack.handler.find_by_id(&ctx, ALICE, &path).await)?;

    ensure!(deleted["statusCode"] == 200, "unexpected status: {deleted}");
    ensure!(deleted["data"] == created["data"]["taskID"], "wrong deleted id");
    ensure!(missing["statusCode"] == 404, "unexpected status: {missing}");
    ensure!(missing.get("data").is_none(), "failure carries data");
    Ok(())
}
