//! Shared application state injected into every handler.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::metrics::RedirectMetrics;
use crate::infrastructure::persistence::PgUrlRepository;
use crate::utils::code_generator::RandomCodeGenerator;

/// State cloned into each request.
///
/// All fields are cheap to clone: services and the cache sit behind `Arc`,
/// the sender and Prometheus handle are reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgUrlRepository, RandomCodeGenerator>>,
    pub redirect_service: Arc<RedirectService<PgUrlRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub metrics: Arc<RedirectMetrics>,
    pub visit_sender: mpsc::Sender<VisitEvent>,
    pub prometheus: PrometheusHandle,
}

impl AppState {
    /// Wires both services over one URL repository and one cache.
    pub fn new(
        url_repository: Arc<PgUrlRepository>,
        cache: Arc<dyn CacheService>,
        metrics: Arc<RedirectMetrics>,
        visit_sender: mpsc::Sender<VisitEvent>,
        prometheus: PrometheusHandle,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            url_repository.clone(),
            Arc::new(RandomCodeGenerator::new()),
            cache.clone(),
        ));
        let redirect_service = Arc::new(RedirectService::new(
            url_repository,
            cache.clone(),
            metrics.clone(),
            visit_sender.clone(),
        ));

        Self {
            link_service,
            redirect_service,
            cache,
            metrics,
            visit_sender,
            prometheus,
        }
    }
}
