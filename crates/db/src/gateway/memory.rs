//! In-memory [`NewsGateway`] for tests.
//!
//! Mirrors the Postgres behaviour that matters to callers: updates are
//! all-or-nothing, attaching an unknown category fails like a foreign-key
//! violation, and categories come back ordered by name.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use newsdesk_core::news::unique_ids;
use newsdesk_core::types::EntityId;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::NewsGateway;
use crate::models::category::{Category, CreateCategory};
use crate::models::news::{CreateNews, News, NewsChanges, NewsWithCategories};

#[derive(Debug, thiserror::Error)]
pub enum MemoryGatewayError {
    #[error("news {0} does not exist")]
    UnknownNews(EntityId),

    #[error("category {0} does not exist")]
    UnknownCategory(EntityId),
}

#[derive(Debug, Default)]
struct Store {
    news: HashMap<EntityId, News>,
    categories: HashMap<EntityId, Category>,
    links: HashMap<EntityId, Vec<EntityId>>,
}

impl Store {
    fn aggregate(&self, id: EntityId) -> Option<NewsWithCategories> {
        let news = self.news.get(&id)?.clone();
        let mut categories: Vec<Category> = self
            .links
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|cid| self.categories.get(cid).cloned())
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Some(NewsWithCategories { news, categories })
    }
}

/// Map-backed gateway that counts every successful write.
#[derive(Debug, Default)]
pub struct InMemoryNewsGateway {
    store: RwLock<Store>,
    writes: AtomicUsize,
}

impl InMemoryNewsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `update` calls so far. Seeding is not counted.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn insert_category(&self, input: &CreateCategory) -> Category {
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.store
            .write()
            .await
            .categories
            .insert(category.id, category.clone());
        category
    }

    pub async fn insert_news(
        &self,
        input: &CreateNews,
    ) -> Result<NewsWithCategories, MemoryGatewayError> {
        let mut store = self.store.write().await;
        if let Some(missing) = input
            .category_ids
            .iter()
            .find(|cid| !store.categories.contains_key(*cid))
        {
            return Err(MemoryGatewayError::UnknownCategory(*missing));
        }

        let now = Utc::now();
        let news = News {
            id: Uuid::new_v4(),
            hat: input.hat.clone(),
            title: input.title.clone(),
            text: input.text.clone(),
            author: input.author.clone(),
            image: input.image.clone(),
            link: input.link.clone(),
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        let id = news.id;
        store.news.insert(id, news);
        store.links.insert(id, unique_ids(&input.category_ids));

        store
            .aggregate(id)
            .ok_or(MemoryGatewayError::UnknownNews(id))
    }
}

#[async_trait]
impl NewsGateway for InMemoryNewsGateway {
    type Error = MemoryGatewayError;

    async fn find_one(
        &self,
        id: EntityId,
    ) -> Result<Option<NewsWithCategories>, MemoryGatewayError> {
        Ok(self.store.read().await.aggregate(id))
    }

    async fn update(
        &self,
        id: EntityId,
        changes: &NewsChanges,
    ) -> Result<NewsWithCategories, MemoryGatewayError> {
        let mut store = self.store.write().await;

        if !store.news.contains_key(&id) {
            return Err(MemoryGatewayError::UnknownNews(id));
        }
        if let Some(missing) = changes
            .connect
            .iter()
            .find(|cid| !store.categories.contains_key(*cid))
        {
            return Err(MemoryGatewayError::UnknownCategory(*missing));
        }

        let links = store.links.entry(id).or_default();
        links.retain(|cid| !changes.disconnect.contains(cid));

        for cid in unique_ids(&changes.connect) {
            if !links.contains(&cid) {
                links.push(cid);
            }
        }

        if let Some(fields) = &changes.fields {
            if let Some(news) = store.news.get_mut(&id) {
                news.hat = fields.hat.clone();
                news.title = fields.title.clone();
                news.text = fields.text.clone();
                news.author = fields.author.clone();
                news.image = fields.image.clone();
                news.link = fields.link.clone();
                news.is_active = fields.is_active;
                news.updated_at = Utc::now();
            }
        }

        self.writes.fetch_add(1, Ordering::SeqCst);
        store.aggregate(id).ok_or(MemoryGatewayError::UnknownNews(id))
    }
}
