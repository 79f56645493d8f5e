//! Visit event model for asynchronous visit recording.

use crate::domain::entities::NewVisit;

/// Client metadata captured from the redirect request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitContext {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl VisitContext {
    /// Creates a context from optional header values.
    pub fn new(user_agent: Option<&str>, referer: Option<&str>) -> Self {
        Self {
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

/// A visit waiting in the queue for the background worker.
///
/// Created by the redirect resolver once a code has been resolved and handed to
/// [`crate::domain::visit_worker::run_visit_worker`] through a bounded channel,
/// so the redirect response never waits on the insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub short_code: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl VisitEvent {
    pub fn new(short_code: impl Into<String>, context: VisitContext) -> Self {
        Self {
            short_code: short_code.into(),
            user_agent: context.user_agent,
            referer: context.referer,
        }
    }
}

impl From<VisitEvent> for NewVisit {
    fn from(event: VisitEvent) -> Self {
        NewVisit {
            short_code: event.short_code,
            user_agent: event.user_agent,
            referer: event.referer,
        }
    }
}
