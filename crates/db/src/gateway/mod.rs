//! Persistence gateway for the news aggregate.
//!
//! The update operation talks to storage only through [`NewsGateway`], so it
//! can run against Postgres ([`PgNewsGateway`]) or, in tests, against
//! [`memory::InMemoryNewsGateway`].

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use newsdesk_core::types::EntityId;

use crate::models::news::{NewsChanges, NewsWithCategories};

pub use postgres::PgNewsGateway;

/// Read and write access to news aggregates.
#[async_trait]
pub trait NewsGateway: Send + Sync {
    /// Storage error surfaced unchanged to callers.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load a news article with its current categories.
    async fn find_one(&self, id: EntityId) -> Result<Option<NewsWithCategories>, Self::Error>;

    /// Apply `changes` to the article as one write and return the result.
    ///
    /// Fails if the article does not exist.
    async fn update(
        &self,
        id: EntityId,
        changes: &NewsChanges,
    ) -> Result<NewsWithCategories, Self::Error>;
}

#[async_trait]
impl<G: NewsGateway + ?Sized> NewsGateway for Arc<G> {
    type Error = G::Error;

    async fn find_one(&self, id: EntityId) -> Result<Option<NewsWithCategories>, Self::Error> {
        (**self).find_one(id).await
    }

    async fn update(
        &self,
        id: EntityId,
        changes: &NewsChanges,
    ) -> Result<NewsWithCategories, Self::Error> {
        (**self).update(id, changes).await
    }
}
