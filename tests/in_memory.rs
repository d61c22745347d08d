//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `task_lifecycle_tests`: Service-level ownership and merge behaviour
//! - `request_flow_tests`: End-to-end handler flows and envelope JSON

mod in_memory {
    pub mod helpers;

    mod request_flow_tests;
    mod task_lifecycle_tests;
}
