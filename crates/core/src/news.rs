//! Category association rules for news articles.
//!
//! A news article carries a set of categories that is unique by id. These
//! helpers decide whether a requested attach is allowed and normalise id lists
//! before they reach the persistence layer.

use crate::error::CoreError;
use crate::types::EntityId;

/// Entity name used in not-found errors for news articles.
pub const ENTITY_NEWS: &str = "News";

/// Message returned when a requested category is already attached.
pub const CATEGORY_ALREADY_ASSOCIATED: &str =
    "This category is already associated with this news";

/// Reject an article whose headline fields are blank.
///
/// `hat` and `title` are shown in every listing; whitespace-only values count
/// as blank. The other text fields may be empty.
pub fn validate_headline(hat: &str, title: &str) -> Result<(), CoreError> {
    for (field, value) in [("hat", hat), ("title", title)] {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("News {field} must not be blank")));
        }
    }
    Ok(())
}

/// Return the requested ids that are already present in `current`.
///
/// Order follows `requested`; an id requested twice is reported once.
pub fn already_attached(requested: &[EntityId], current: &[EntityId]) -> Vec<EntityId> {
    unique_ids(requested)
        .into_iter()
        .filter(|id| current.contains(id))
        .collect()
}

/// Fail with [`CoreError::Conflict`] if any requested id is already attached.
///
/// `current` must be the category set as loaded, before any detach is
/// applied. An id that is both requested and scheduled for removal still
/// conflicts when it is currently attached.
pub fn ensure_not_attached(requested: &[EntityId], current: &[EntityId]) -> Result<(), CoreError> {
    if already_attached(requested, current).is_empty() {
        Ok(())
    } else {
        Err(CoreError::Conflict(CATEGORY_ALREADY_ASSOCIATED.to_string()))
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
pub fn unique_ids(ids: &[EntityId]) -> Vec<EntityId> {
    let mut out: Vec<EntityId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}
