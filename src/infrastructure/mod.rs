//! Infrastructure layer for external integrations.
//!
//! - [`cache`] - Cache backends (Redis, in-memory, layered, no-op)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`metrics`] - Redirect counters and Prometheus export

pub mod cache;
pub mod metrics;
pub mod persistence;
