//! News article model and DTOs.
//!
//! A news article is associated with any number of categories through the
//! `news_categories` junction table. The aggregate returned to callers is
//! [`NewsWithCategories`].

use newsdesk_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::Category;

/// A row from the `news` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct News {
    pub id: EntityId,
    pub hat: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub image: String,
    pub link: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A news article together with its current category set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsWithCategories {
    #[serde(flatten)]
    pub news: News,
    pub categories: Vec<Category>,
}

impl NewsWithCategories {
    /// Ids of the attached categories, in the order they were loaded.
    pub fn category_ids(&self) -> Vec<EntityId> {
        self.categories.iter().map(|c| c.id).collect()
    }
}

/// DTO for creating a new news article.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNews {
    pub hat: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub image: String,
    pub link: String,
    pub is_active: bool,
    /// Category IDs to associate with the article.
    #[serde(default)]
    pub category_ids: Vec<EntityId>,
}

/// DTO for updating a news article.
///
/// Scalar fields always overwrite the stored values. `category_ids` are
/// attached and `categories_to_remove` are detached; either may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNews {
    pub hat: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub image: String,
    pub link: String,
    pub is_active: bool,
    pub category_ids: Option<Vec<EntityId>>,
    pub categories_to_remove: Option<Vec<EntityId>>,
}

impl UpdateNews {
    /// The scalar columns carried by this update.
    pub fn fields(&self) -> NewsFields {
        NewsFields {
            hat: self.hat.clone(),
            title: self.title.clone(),
            text: self.text.clone(),
            author: self.author.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
            is_active: self.is_active,
        }
    }
}

/// Replacement values for every scalar column of a news row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsFields {
    pub hat: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub image: String,
    pub link: String,
    pub is_active: bool,
}

/// A single write against one news aggregate.
///
/// Applied in order: `disconnect`, then `fields`, then `connect`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsChanges {
    pub fields: Option<NewsFields>,
    pub connect: Vec<EntityId>,
    pub disconnect: Vec<EntityId>,
}
