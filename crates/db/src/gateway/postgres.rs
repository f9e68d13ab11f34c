use async_trait::async_trait;
use newsdesk_core::types::EntityId;
use sqlx::PgPool;

use super::NewsGateway;
use crate::models::news::{NewsChanges, NewsWithCategories};
use crate::repositories::NewsRepo;

/// [`NewsGateway`] backed by a Postgres pool.
///
/// Cheap to clone; the pool is reference-counted.
#[derive(Debug, Clone)]
pub struct PgNewsGateway {
    pool: PgPool,
}

impl PgNewsGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsGateway for PgNewsGateway {
    type Error = sqlx::Error;

    async fn find_one(&self, id: EntityId) -> Result<Option<NewsWithCategories>, sqlx::Error> {
        NewsRepo::find_by_id_with_categories(&self.pool, id).await
    }

    async fn update(
        &self,
        id: EntityId,
        changes: &NewsChanges,
    ) -> Result<NewsWithCategories, sqlx::Error> {
        NewsRepo::apply_changes(&self.pool, id, changes)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}
