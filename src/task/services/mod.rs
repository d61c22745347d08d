//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{DEFAULT_COMPLETION_WINDOW, TaskLifecycleService};
