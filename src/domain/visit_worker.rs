//! Background worker persisting visit events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::entities::NewVisit;
use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;

/// Retries after the first failed insert.
const MAX_RETRIES: usize = 2;

/// Drains the visit queue and writes each event through the repository.
///
/// Each insert is retried with jittered exponential backoff. A visit that still
/// fails is logged and dropped; the redirect it belongs to has already been
/// answered. Returns once every sender is dropped and the queue is empty.
pub async fn run_visit_worker<R>(mut rx: mpsc::Receiver<VisitEvent>, repository: Arc<R>)
where
    R: VisitRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        let new_visit = NewVisit::from(event);
        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(MAX_RETRIES);

        let result = Retry::spawn(strategy, || {
            let repository = repository.clone();
            let new_visit = new_visit.clone();
            async move { repository.insert_visit(new_visit).await }
        })
        .await;

        match result {
            Ok(visit) => debug!(short_code = %visit.short_code, "Visit recorded"),
            Err(e) => warn!(
                short_code = %new_visit.short_code,
                error = %e,
                "Failed to record visit, dropping it"
            ),
        }
    }

    info!("Visit worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Visit;
    use crate::domain::repositories::MockVisitRepository;
    use crate::domain::visit_event::VisitContext;
    use crate::error::AppError;
    use chrono::Utc;
    use serde_json::json;

    fn stored(new_visit: &NewVisit) -> Visit {
        Visit {
            id: 1,
            short_code: new_visit.short_code.clone(),
            visited_at: Utc::now(),
            user_agent: new_visit.user_agent.clone(),
            referer: new_visit.referer.clone(),
        }
    }

    #[tokio::test]
    async fn test_worker_persists_each_event_once() {
        let mut mock_repo = MockVisitRepository::new();
        mock_repo
            .expect_insert_visit()
            .withf(|v| v.short_code == "aB3dE9z" && v.user_agent.as_deref() == Some("curl/8"))
            .times(1)
            .returning(|v| Ok(stored(&v)));

        let (tx, rx) = mpsc::channel(8);
        tx.send(VisitEvent::new(
            "aB3dE9z",
            VisitContext::new(Some("curl/8"), None),
        ))
        .await
        .unwrap();
        drop(tx);

        run_visit_worker(rx, Arc::new(mock_repo)).await;
    }

    #[tokio::test]
    async fn test_worker_retries_then_drops_failed_visit() {
        let mut mock_repo = MockVisitRepository::new();
        mock_repo
            .expect_insert_visit()
            .times(1 + MAX_RETRIES)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let (tx, rx) = mpsc::channel(8);
        tx.send(VisitEvent::new("failing", VisitContext::default()))
            .await
            .unwrap();
        drop(tx);

        run_visit_worker(rx, Arc::new(mock_repo)).await;
    }

    #[tokio::test]
    async fn test_worker_continues_after_failure() {
        let mut mock_repo = MockVisitRepository::new();
        mock_repo
            .expect_insert_visit()
            .withf(|v| v.short_code == "failing")
            .times(1 + MAX_RETRIES)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        mock_repo
            .expect_insert_visit()
            .withf(|v| v.short_code == "working")
            .times(1)
            .returning(|v| Ok(stored(&v)));

        let (tx, rx) = mpsc::channel(8);
        tx.send(VisitEvent::new("failing", VisitContext::default()))
            .await
            .unwrap();
        tx.send(VisitEvent::new("working", VisitContext::default()))
            .await
            .unwrap();
        drop(tx);

        run_visit_worker(rx, Arc::new(mock_repo)).await;
    }
}
