//! Per-user task management.
//!
//! Authenticated users create, update, list, complete and delete their own
//! tasks. Every operation resolves the caller from a bearer credential,
//! validates input, and scopes storage access to the caller's records. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Request validation in [`validation`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - The transport-agnostic handler and envelopes in [`api`]

pub mod adapters;
pub mod api;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
