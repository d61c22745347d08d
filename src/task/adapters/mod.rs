//! Adapter implementations for task ports.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::JwtIdentityResolver;
