//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ShortenedUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

/// PostgreSQL repository for short code mappings.
///
/// Every call checks a connection out of the pool for a single statement and
/// returns it on completion, error, or cancellation.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert_mapping(
        &self,
        short_code: &str,
        original_url: &str,
    ) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO shortened_urls (short_code, original_url)
            VALUES ($1, $2)
            RETURNING short_code
            "#,
        )
        .bind(short_code)
        .bind(original_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                AppError::conflict("Short code already exists", json!({ "code": short_code }))
            } else if e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                tracing::error!(error = %e, "Unexpected unique violation");
                AppError::internal("Database error", json!({}))
            } else {
                AppError::from(e)
            }
        })
    }

    async fn find_url(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>(
            r#"
            SELECT original_url
            FROM shortened_urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn list_all(&self) -> Result<Vec<ShortenedUrl>, AppError> {
        let rows = sqlx::query_as::<_, ShortenedUrl>(
            r#"
            SELECT short_code, original_url, created_at
            FROM shortened_urls
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shortened_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
