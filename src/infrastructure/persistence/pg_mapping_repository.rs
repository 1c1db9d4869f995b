//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::{InsertOutcome, Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_id;

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: String,
    url: String,
    created: DateTime<Utc>,
}

impl From<MappingRow> for Mapping {
    fn from(row: MappingRow) -> Self {
        Mapping::new(row.id, row.url, row.created)
    }
}

/// PostgreSQL repository for mappings.
///
/// Uniqueness is enforced by the `mappings_pkey` primary key. Each insert runs
/// in its own transaction so a collided attempt is rolled back before the
/// caller tries the next candidate.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert_if_absent(&self, new_mapping: NewMapping) -> Result<InsertOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO mappings (id, url, created)
            VALUES ($1, $2, $3)
            RETURNING id, url, created
            "#,
        )
        .bind(&new_mapping.id)
        .bind(&new_mapping.url)
        .bind(new_mapping.created)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(row) => {
                tx.commit().await?;
                Ok(InsertOutcome::Inserted(row.into()))
            }
            Err(e) if is_unique_violation_on_id(&e) => {
                debug!("Identifier {} already taken, rolling back", new_mapping.id);
                tx.rollback().await?;
                Ok(InsertOutcome::Conflict)
            }
            // dropping `tx` rolls it back
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Mapping>, AppError> {
        let row =
            sqlx::query_as::<_, MappingRow>("SELECT id, url, created FROM mappings WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Mapping::from))
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
