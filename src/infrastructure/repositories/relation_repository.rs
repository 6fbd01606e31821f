//! Relation Repository Implementation
//!
//! One PostgreSQL implementation serves favorites, shopping cart and
//! subscriptions. The [`RelationKind`] picks the table; the composite primary
//! key on (owner, target) enforces uniqueness.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{RelationKind, RelationRepository};
use crate::shared::error::AppError;

/// PostgreSQL relation repository implementation.
#[derive(Clone)]
pub struct PgRelationRepository {
    pool: PgPool,
    kind: RelationKind,
}

impl PgRelationRepository {
    pub fn new(pool: PgPool, kind: RelationKind) -> Self {
        Self { pool, kind }
    }

    fn columns(&self) -> (&'static str, &'static str, &'static str) {
        (
            self.kind.table(),
            self.kind.owner_column(),
            self.kind.target_column(),
        )
    }
}

#[async_trait]
impl RelationRepository for PgRelationRepository {
    fn kind(&self) -> RelationKind {
        self.kind
    }

    async fn add(&self, owner_id: i64, target_id: i64) -> Result<(), AppError> {
        let (table, owner, target) = self.columns();

        sqlx::query(&format!(
            "INSERT INTO {table} ({owner}, {target}) VALUES ($1, $2)"
        ))
        .bind(owner_id)
        .bind(target_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::AlreadyExists(format!("Already in {}", self.kind))
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!("Target {} not found", target_id))
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                AppError::InvalidOperation("You cannot subscribe to yourself".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(())
    }

    async fn remove(&self, owner_id: i64, target_id: i64) -> Result<(), AppError> {
        let (table, owner, target) = self.columns();

        let result = sqlx::query(&format!(
            "DELETE FROM {table} WHERE {owner} = $1 AND {target} = $2"
        ))
        .bind(owner_id)
        .bind(target_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Not in {}", self.kind)));
        }

        Ok(())
    }

    async fn exists(&self, owner_id: i64, target_id: i64) -> Result<bool, AppError> {
        let (table, owner, target) = self.columns();

        let exists = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE {owner} = $1 AND {target} = $2)"
        ))
        .bind(owner_id)
        .bind(target_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn filter_existing(&self, owner_id: i64, target_ids: &[i64]) -> Result<Vec<i64>, AppError> {
        if target_ids.is_empty() {
            return Ok(Vec::new());
        }

        let (table, owner, target) = self.columns();

        let ids = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT {target} FROM {table} WHERE {owner} = $1 AND {target} = ANY($2)"
        ))
        .bind(owner_id)
        .bind(target_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
