//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation
//! - [`db_error`] - Database error classification
//! - [`cancellation`] - Request-scoped cancellation helpers
//! - [`url_norm`] - Canonical form for stored URLs

pub mod cancellation;
pub mod code_generator;
pub mod db_error;
pub mod url_norm;
