//! Redirect counters.
//!
//! Two monotonic counters, each labelled with the short code involved:
//!
//! | Name | Incremented when |
//! |------|------------------|
//! | `url_shortener.redirects` | a code resolved to a URL |
//! | `url_shortener.failed_redirects` | a code had no mapping |
//!
//! Counts go to the global `metrics` recorder (exported at `GET /metrics`) and
//! are mirrored in process-local atomics so health checks and tests can read
//! them without a recorder installed.

use metrics::{Unit, counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

pub const REDIRECTS_COUNTER: &str = "url_shortener.redirects";
pub const FAILED_REDIRECTS_COUNTER: &str = "url_shortener.failed_redirects";

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the global Prometheus recorder once per process and returns its handle.
///
/// If another recorder is already installed, a detached recorder is built so
/// the `/metrics` endpoint still has something to render.
pub fn install_prometheus_recorder() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install Prometheus recorder, using detached one");
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

/// Process-scoped redirect counters.
///
/// Created once at startup and shared behind an `Arc`. Increments are atomic,
/// there is no reset.
#[derive(Debug, Default)]
pub struct RedirectMetrics {
    redirects: AtomicU64,
    failed_redirects: AtomicU64,
}

impl RedirectMetrics {
    /// Registers counter descriptions with the global recorder.
    pub fn new() -> Self {
        describe_counter!(
            REDIRECTS_COUNTER,
            Unit::Count,
            "Number of successful redirects"
        );
        describe_counter!(
            FAILED_REDIRECTS_COUNTER,
            Unit::Count,
            "Number of failed redirects"
        );

        Self::default()
    }

    pub fn record_redirect(&self, short_code: &str) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
        counter!(REDIRECTS_COUNTER, "short_code" => short_code.to_string()).increment(1);
    }

    pub fn record_failed_redirect(&self, short_code: &str) {
        self.failed_redirects.fetch_add(1, Ordering::Relaxed);
        counter!(FAILED_REDIRECTS_COUNTER, "short_code" => short_code.to_string()).increment(1);
    }

    /// Successful redirects since startup.
    pub fn redirects(&self) -> u64 {
        self.redirects.load(Ordering::Relaxed)
    }

    /// Failed redirects since startup.
    pub fn failed_redirects(&self) -> u64 {
        self.failed_redirects.load(Ordering::Relaxed)
    }
}
