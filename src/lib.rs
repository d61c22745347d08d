//! Tasktrack: per-user task tracking.
//!
//! This crate provides the core of a multi-user task service: identity
//! resolution from bearer tokens, request validation, owner-scoped task
//! storage, and uniform response envelopes.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and identity
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, JWT, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, storage and request handling
//! - [`config`]: TOML and environment configuration
//! - [`telemetry`]: Process-wide `tracing` subscriber set-up

pub mod config;
pub mod task;
pub mod telemetry;
