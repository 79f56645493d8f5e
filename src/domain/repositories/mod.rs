//! Repository trait definitions for the domain layer.
//!
//! Together these traits form the persistence gateway: the only writer of
//! durable state. Implementations live in `crate::infrastructure::persistence`
//! and mocks are generated by `mockall` for unit tests.
//!
//! - [`UrlRepository`] - Short code mappings
//! - [`VisitRepository`] - Visit records

pub mod url_repository;
pub mod visit_repository;

pub use url_repository::UrlRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
