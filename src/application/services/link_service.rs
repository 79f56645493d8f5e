//! Short link creation and listing service.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::domain::entities::ShortenedUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::cancellation::with_cancellation;
use crate::utils::code_generator::CodeGenerator;

/// Retries allowed after the first insert attempt.
pub const MAX_RETRIES: usize = 3;

/// Total insert attempts per shorten request.
pub const MAX_ATTEMPTS: usize = MAX_RETRIES + 1;

/// States of a single shorten request.
///
/// `attempt` is 1-based and counts inserts of any outcome, so a store that
/// keeps failing for reasons other than a conflict still exhausts the budget.
#[derive(Debug)]
enum ShortenState {
    Generating { attempt: usize },
    Inserting { attempt: usize, code: String },
    Retrying { attempt: usize },
    Succeeded(String),
    Failed { attempts: usize },
}

/// Service for creating and listing shortened URLs.
///
/// Generates random codes, relies on the store's unique constraint to detect
/// collisions and retries within a fixed budget. New mappings are written
/// through to the cache on a best-effort basis.
pub struct LinkService<R: UrlRepository, G: CodeGenerator> {
    url_repository: Arc<R>,
    code_generator: Arc<G>,
    cache: Arc<dyn CacheService>,
}

impl<R: UrlRepository, G: CodeGenerator> LinkService<R, G> {
    /// Creates a new link service.
    pub fn new(url_repository: Arc<R>, code_generator: Arc<G>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            url_repository,
            code_generator,
            cache,
        }
    }

    /// Shortens `original_url` and returns the new short code.
    ///
    /// The URL is expected to be validated by the caller.
    ///
    /// # Retry Policy
    ///
    /// Up to [`MAX_ATTEMPTS`] inserts, each with a freshly generated code. Both
    /// conflicts and other store errors consume an attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShortenFailed`] once the attempt budget is exhausted.
    /// Returns [`AppError::Cancelled`] if `cancel` fires at any I/O point.
    pub async fn shorten_url(
        &self,
        original_url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, AppError> {
        let mut conflicts = 0;
        let mut state = ShortenState::Generating { attempt: 1 };

        loop {
            state = match state {
                ShortenState::Generating { attempt } => {
                    if cancel.is_cancelled() {
                        return Err(AppError::cancelled());
                    }
                    ShortenState::Inserting {
                        attempt,
                        code: self.code_generator.generate(),
                    }
                }
                ShortenState::Inserting { attempt, code } => {
                    let inserted = with_cancellation(
                        cancel,
                        self.url_repository.insert_mapping(&code, original_url),
                    )
                    .await?;

                    match inserted {
                        Ok(code) => {
                            self.populate_cache(&code, original_url, cancel).await?;
                            ShortenState::Succeeded(code)
                        }
                        Err(e) if e.is_conflict() => {
                            conflicts += 1;
                            warn!(
                                code = %code,
                                attempt,
                                max_attempts = MAX_ATTEMPTS,
                                "Short code collision"
                            );
                            ShortenState::Retrying { attempt }
                        }
                        Err(e) => {
                            error!(error = %e, attempt, "Failed to store short code");
                            ShortenState::Retrying { attempt }
                        }
                    }
                }
                ShortenState::Retrying { attempt } if attempt >= MAX_ATTEMPTS => {
                    ShortenState::Failed { attempts: attempt }
                }
                ShortenState::Retrying { attempt } => ShortenState::Generating {
                    attempt: attempt + 1,
                },
                ShortenState::Succeeded(code) => {
                    debug!(code = %code, "Short link created");
                    return Ok(code);
                }
                ShortenState::Failed { attempts } => {
                    error!(
                        attempts,
                        conflicts, "Failed to generate a unique short code"
                    );
                    return Err(AppError::shorten_failed(attempts, conflicts));
                }
            };
        }
    }

    /// Lists every short link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    /// Returns [`AppError::Cancelled`] if `cancel` fires.
    pub async fn list_urls(&self, cancel: &CancellationToken) -> Result<Vec<ShortenedUrl>, AppError> {
        with_cancellation(cancel, self.url_repository.list_all()).await?
    }

    /// Counts stored short links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_urls(&self) -> Result<i64, AppError> {
        self.url_repository.count().await
    }

    async fn populate_cache(
        &self,
        code: &str,
        original_url: &str,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        if let Err(e) = with_cancellation(cancel, self.cache.set_url(code, original_url)).await? {
            warn!(code, error = %e, "Failed to cache new short link");
        }
        Ok(())
    }
}
