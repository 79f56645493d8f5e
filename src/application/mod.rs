//! Application layer services implementing business logic.
//!
//! Services coordinate repositories, the cache, and metrics. They consume
//! repository traits and expose the operations the HTTP handlers call.
//!
//! - [`services::link_service::LinkService`] - Short link creation and listing
//! - [`services::redirect_service::RedirectService`] - Cache-aside resolution and visit tracking
//!
//! The two services never call each other.

pub mod services;
