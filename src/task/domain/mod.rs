//! Domain model for per-user task tracking.
//!
//! The domain keeps ownership, identifiers and timestamps out of the
//! client's reach: requests carry only content, the owner comes from the
//! authenticated identity, and identifiers come from storage.

mod error;
mod ids;
mod request;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, UserId};
pub use request::{TaskRequest, TaskStatusRequest};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch};
