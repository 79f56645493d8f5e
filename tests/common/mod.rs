#![allow(dead_code)]

use sqlx::PgPool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use url_shortener::domain::visit_event::VisitEvent;
use url_shortener::infrastructure::cache::{CacheService, NullCache};
use url_shortener::infrastructure::metrics::{RedirectMetrics, install_prometheus_recorder};
use url_shortener::infrastructure::persistence::PgUrlRepository;
use url_shortener::state::AppState;
use url_shortener::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

pub async fn create_test_url(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO shortened_urls (short_code, original_url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_url_at(pool: &PgPool, code: &str, url: &str, minutes_ago: i32) {
    sqlx::query(
        "INSERT INTO shortened_urls (short_code, original_url, created_at)
         VALUES ($1, $2, NOW() - make_interval(mins => $3))",
    )
    .bind(code)
    .bind(url)
    .bind(minutes_ago)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_visits(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_visits WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<VisitEvent>) {
    create_test_state_with_cache(pool, Arc::new(NullCache::new()))
}

pub fn create_test_state_with_cache(
    pool: PgPool,
    cache: Arc<dyn CacheService>,
) -> (AppState, mpsc::Receiver<VisitEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        Arc::new(PgUrlRepository::new(Arc::new(pool))),
        cache,
        Arc::new(RedirectMetrics::new()),
        tx,
        install_prometheus_recorder(),
    );

    (state, rx)
}

/// Hands out codes from a fixed script, then falls back to random codes.
pub struct ScriptedCodeGenerator {
    script: Mutex<VecDeque<String>>,
    calls: Mutex<usize>,
}

impl ScriptedCodeGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            script: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl CodeGenerator for ScriptedCodeGenerator {
    fn generate(&self) -> String {
        *self.calls.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RandomCodeGenerator::new().generate())
    }
}
