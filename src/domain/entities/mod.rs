//! Core domain entities.
//!
//! - [`ShortenedUrl`] - A short code and the URL it points to
//! - [`Visit`] - A recorded redirect of a short code
//!
//! Records being inserted use separate input structs (`NewVisit`), while
//! server-assigned fields (ids, timestamps) only exist on the read side.

pub mod shortened_url;
pub mod visit;

pub use shortened_url::ShortenedUrl;
pub use visit::{NewVisit, Visit};
