//! Task request validation.
//!
//! Provides the individual field rules and the composite validator used by
//! the lifecycle service.

pub mod rules;
pub mod service;

pub use service::DefaultTaskValidator;
