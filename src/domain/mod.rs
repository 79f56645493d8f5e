//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`visit_event`] - Visit tracking event model
//! - [`visit_worker`] - Asynchronous visit persistence worker
//!
//! The domain layer has no dependency on the HTTP layer. Repository traits are
//! implemented in `crate::infrastructure::persistence`.
//!
//! # Visit Processing Flow
//!
//! 1. The redirect resolver resolves a short code
//! 2. A [`visit_event::VisitEvent`] is pushed to a bounded channel (non-blocking)
//! 3. [`visit_worker::run_visit_worker`] persists it with retry
//! 4. Visit rows are written via [`repositories::VisitRepository`]

pub mod entities;
pub mod repositories;
pub mod visit_event;
pub mod visit_worker;
