//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// PostgreSQL repository for visit logging.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn insert_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let visit = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO url_visits (short_code, user_agent, referer)
            VALUES ($1, $2, $3)
            RETURNING id, short_code, visited_at, user_agent, referer
            "#,
        )
        .bind(&new_visit.short_code)
        .bind(&new_visit.user_agent)
        .bind(&new_visit.referer)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(visit)
    }

    async fn count_by_code(&self, short_code: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM url_visits
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
