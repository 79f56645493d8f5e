//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx with
//! bound parameters.
//!
//! - [`PgUrlRepository`] - Short code mappings
//! - [`PgVisitRepository`] - Visit records

pub mod pg_url_repository;
pub mod pg_visit_repository;

pub use pg_url_repository::PgUrlRepository;
pub use pg_visit_repository::PgVisitRepository;
