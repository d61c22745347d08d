//! Domain-focused tests for identifiers, task construction and patches.

use super::FixedClock;
use crate::task::domain::{
    NewTask, Task, TaskDomainError, TaskId, TaskPatch, TaskRequest, TaskStatusRequest, UserId,
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> FixedClock {
    FixedClock::standard()
}

#[fixture]
fn owner() -> UserId {
    UserId::new(42).expect("valid user id")
}

fn persisted(owner: UserId, clock: &FixedClock) -> Task {
    let request = TaskRequest::new("Buy milk").with_description("2%");
    NewTask::new(owner, request, TimeDelta::hours(1), clock)
        .into_persisted(TaskId::new(7).expect("valid task id"))
}

#[rstest]
#[case(0)]
#[case(-5)]
fn identifiers_reject_non_positive_values(#[case] raw: i64) {
    assert_eq!(TaskId::new(raw), Err(TaskDomainError::InvalidTaskId(raw)));
    assert_eq!(UserId::new(raw), Err(TaskDomainError::InvalidUserId(raw)));
}

#[rstest]
fn identifiers_parse_trimmed_decimal_text() {
    assert_eq!(" 17 ".parse::<TaskId>().map(TaskId::value), Ok(17));
    assert_eq!("42".parse::<UserId>().map(UserId::value), Ok(42));
}

#[rstest]
fn task_id_parse_rejects_non_numeric_text() {
    assert_eq!(
        "abc".parse::<TaskId>(),
        Err(TaskDomainError::MalformedTaskId("abc".to_owned()))
    );
}

#[rstest]
fn new_task_is_incomplete_and_owned_by_caller(clock: FixedClock, owner: UserId) {
    let request = TaskRequest::new("Buy milk").with_description("2%");
    let task = NewTask::new(owner, request, TimeDelta::hours(1), &clock);

    assert_eq!(task.user_id(), owner);
    assert!(!task.completed());
    assert_eq!(task.created_at(), clock.utc());
    assert_eq!(task.completed_at(), clock.utc() + TimeDelta::hours(1));
}

#[rstest]
fn new_task_defaults_missing_description_to_empty(clock: FixedClock, owner: UserId) {
    let task = NewTask::new(owner, TaskRequest::new("Buy milk"), TimeDelta::zero(), &clock);
    assert_eq!(task.description(), "");
}

#[rstest]
fn oversized_completion_window_saturates(clock: FixedClock, owner: UserId) {
    let task = NewTask::new(owner, TaskRequest::new("Forever"), TimeDelta::MAX, &clock);
    assert_eq!(task.completed_at(), DateTime::<Utc>::MAX_UTC);
}

#[rstest]
fn persisted_task_has_no_update_timestamp(clock: FixedClock, owner: UserId) {
    let task = persisted(owner, &clock);

    assert_eq!(task.id().value(), 7);
    assert_eq!(task.updated_at(), None);
    assert!(task.is_owned_by(owner));
}

#[rstest]
fn content_patch_keeps_description_when_absent(clock: FixedClock, owner: UserId) {
    let mut task = persisted(owner, &clock);
    let patch = TaskPatch::from_request(TaskRequest::new("Buy milk and eggs"), &clock);

    task.apply_patch(&patch);

    assert_eq!(task.title(), "Buy milk and eggs");
    assert_eq!(task.description(), "2%");
    assert!(!task.completed());
    assert_eq!(task.updated_at(), Some(clock.utc()));
}

#[rstest]
fn content_patch_overwrites_description_with_explicit_empty(clock: FixedClock, owner: UserId) {
    let mut task = persisted(owner, &clock);
    let patch = TaskPatch::from_request(TaskRequest::new("Buy milk").with_description(""), &clock);

    task.apply_patch(&patch);

    assert_eq!(task.description(), "");
}

#[rstest]
fn status_patch_preserves_content_and_markers(clock: FixedClock, owner: UserId) {
    let mut task = persisted(owner, &clock);
    let completed_at = task.completed_at();
    let created_at = task.created_at();

    task.apply_patch(&TaskPatch::status(true, &clock));

    assert!(task.completed());
    assert_eq!(task.title(), "Buy milk");
    assert_eq!(task.completed_at(), completed_at);
    assert_eq!(task.created_at(), created_at);
    assert_eq!(task.user_id(), owner);
}

#[rstest]
fn task_serializes_with_wire_names(clock: FixedClock, owner: UserId) {
    let value = serde_json::to_value(persisted(owner, &clock)).expect("serializable task");

    assert_eq!(value["taskID"], 7);
    assert_eq!(value["userID"], 42);
    assert_eq!(value["title"], "Buy milk");
    assert_eq!(value["completed"], false);
    assert!(value.get("completedAt").is_some());
    assert!(value.get("createdAt").is_some());
    assert!(value["updatedAt"].is_null());
}

#[rstest]
fn request_decoding_ignores_smuggled_owner() {
    let request: TaskRequest =
        serde_json::from_str(r#"{"title":"Buy milk","description":"2%","userID":999}"#)
            .expect("decodable request");

    assert_eq!(request, TaskRequest::new("Buy milk").with_description("2%"));
}

#[rstest]
fn request_decoding_defaults_missing_title() {
    let request: TaskRequest =
        serde_json::from_str(r#"{"description":"2%"}"#).expect("decodable request");

    assert_eq!(request.title(), "");
    assert_eq!(request.description(), Some("2%"));
}

#[rstest]
fn status_request_requires_completed_flag() {
    assert!(serde_json::from_str::<TaskStatusRequest>("{}").is_err());
    assert_eq!(
        serde_json::from_str::<TaskStatusRequest>(r#"{"completed":true}"#).ok(),
        Some(TaskStatusRequest { completed: true })
    );
}
