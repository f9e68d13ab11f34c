//! The news update operation.
//!
//! Checks the headline, loads the article, rejects attaches of categories it already carries, then
//! submits detach, field overwrite, and attach to the gateway as one write.
//! The duplicate check runs against the category set as loaded, before any
//! detach: an id listed in both `category_ids` and `categories_to_remove`
//! conflicts if it is currently attached.

use newsdesk_core::error::CoreError;
use newsdesk_core::news::{
    already_attached, ensure_not_attached, unique_ids, validate_headline, ENTITY_NEWS,
};
use newsdesk_core::types::EntityId;
use newsdesk_db::gateway::NewsGateway;
use newsdesk_db::models::news::{NewsChanges, NewsWithCategories, UpdateNews};

/// Failure of [`UpdateNewsService::execute`].
#[derive(Debug, thiserror::Error)]
pub enum UpdateNewsError<E>
where
    E: std::error::Error + 'static,
{
    /// Invalid input, missing article, or conflicting category, decided
    /// before any write.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error raised by the gateway, passed through unchanged.
    #[error(transparent)]
    Gateway(E),
}

/// Updates one news article and its category associations.
pub struct UpdateNewsService<G> {
    gateway: G,
}

impl<G: NewsGateway> UpdateNewsService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Overwrite the article's scalar fields and adjust its categories.
    ///
    /// Writes nothing when the headline is blank, the article is missing, or a
    /// requested category is already attached.
    pub async fn execute(
        &self,
        id: EntityId,
        input: &UpdateNews,
    ) -> Result<NewsWithCategories, UpdateNewsError<G::Error>> {
        validate_headline(&input.hat, &input.title)?;

        let current = self
            .gateway
            .find_one(id)
            .await
            .map_err(UpdateNewsError::Gateway)?
            .ok_or(CoreError::NotFound {
                entity: ENTITY_NEWS,
                id,
            })?;

        if let Some(requested) = &input.category_ids {
            let existing = current.category_ids();
            if let Err(err) = ensure_not_attached(requested, &existing) {
                tracing::debug!(
                    news_id = %id,
                    duplicates = ?already_attached(requested, &existing),
                    "Rejected attach of already associated categories",
                );
                return Err(err.into());
            }
        }

        let changes = NewsChanges {
            fields: Some(input.fields()),
            connect: input
                .category_ids
                .as_deref()
                .map(unique_ids)
                .unwrap_or_default(),
            disconnect: input
                .categories_to_remove
                .as_deref()
                .map(unique_ids)
                .unwrap_or_default(),
        };

        let updated = self
            .gateway
            .update(id, &changes)
            .await
            .map_err(UpdateNewsError::Gateway)?;

        tracing::debug!(
            news_id = %id,
            attached = changes.connect.len(),
            detached = changes.disconnect.len(),
            "News changes applied",
        );

        Ok(updated)
    }
}
