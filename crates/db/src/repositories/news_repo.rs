//! Repository for the `news` and `news_categories` tables.

use newsdesk_core::types::EntityId;
use sqlx::{PgExecutor, PgPool};

use crate::models::category::Category;
use crate::models::news::{CreateNews, News, NewsChanges, NewsWithCategories};

/// Column list for the `news` table.
const COLUMNS: &str = "id, hat, title, text, author, image, link, is_active, \
    created_at, updated_at";

/// Column list for the `categories` table (used in JOIN queries).
const CATEGORY_COLUMNS: &str = "c.id, c.name, c.description, c.created_at, c.updated_at";

/// Provides CRUD operations for news articles and their category associations.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a new news article.
    ///
    /// If `category_ids` is non-empty, also creates junction rows in the same
    /// transaction.
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO news (hat, title, text, author, image, link, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let news = sqlx::query_as::<_, News>(&query)
            .bind(&input.hat)
            .bind(&input.title)
            .bind(&input.text)
            .bind(&input.author)
            .bind(&input.image)
            .bind(&input.link)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        attach_categories(&mut *tx, news.id, &input.category_ids).await?;

        tx.commit().await?;
        Ok(news)
    }

    /// Find a news article by its ID.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a news article by ID, enriched with its categories.
    pub async fn find_by_id_with_categories(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<NewsWithCategories>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(news) => {
                let categories = Self::get_categories(pool, news.id).await?;
                Ok(Some(NewsWithCategories { news, categories }))
            }
            None => Ok(None),
        }
    }

    /// Get all categories attached to a news article, ordered by name.
    pub async fn get_categories(
        pool: &PgPool,
        news_id: EntityId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        fetch_categories(pool, news_id).await
    }

    /// Apply detach, scalar overwrite, and attach to one article atomically.
    ///
    /// The row is locked for the duration of the transaction. Returns `None`
    /// (and writes nothing) if no article with the given `id` exists. A
    /// category id in `connect` that does not exist fails the whole write with
    /// a foreign-key violation.
    pub async fn apply_changes(
        pool: &PgPool,
        id: EntityId,
        changes: &NewsChanges,
    ) -> Result<Option<NewsWithCategories>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked =
            sqlx::query_scalar::<_, EntityId>("SELECT id FROM news WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        if !changes.disconnect.is_empty() {
            let result = sqlx::query(
                "DELETE FROM news_categories \
                 WHERE news_id = $1 AND category_id = ANY($2)",
            )
            .bind(id)
            .bind(&changes.disconnect[..])
            .execute(&mut *tx)
            .await?;
            tracing::debug!(
                news_id = %id,
                detached = result.rows_affected(),
                "Detached categories from news",
            );
        }

        let news = match &changes.fields {
            Some(fields) => {
                let query = format!(
                    "UPDATE news SET \
                        hat = $2, title = $3, text = $4, author = $5, \
                        image = $6, link = $7, is_active = $8 \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, News>(&query)
                    .bind(id)
                    .bind(&fields.hat)
                    .bind(&fields.title)
                    .bind(&fields.text)
                    .bind(&fields.author)
                    .bind(&fields.image)
                    .bind(&fields.link)
                    .bind(fields.is_active)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
                sqlx::query_as::<_, News>(&query)
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        attach_categories(&mut *tx, id, &changes.connect).await?;

        let categories = fetch_categories(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(Some(NewsWithCategories { news, categories }))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Insert junction rows, skipping pairs that already exist.
async fn attach_categories<'e, E>(
    executor: E,
    news_id: EntityId,
    category_ids: &[EntityId],
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if category_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO news_categories (news_id, category_id) \
         SELECT $1, UNNEST($2::uuid[]) \
         ON CONFLICT DO NOTHING",
    )
    .bind(news_id)
    .bind(category_ids)
    .execute(executor)
    .await?;
    Ok(())
}

async fn fetch_categories<'e, E>(
    executor: E,
    news_id: EntityId,
) -> Result<Vec<Category>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        "SELECT {CATEGORY_COLUMNS} \
         FROM categories c \
         JOIN news_categories nc ON nc.category_id = c.id \
         WHERE nc.news_id = $1 \
         ORDER BY c.name, c.id"
    );
    sqlx::query_as::<_, Category>(&query)
        .bind(news_id)
        .fetch_all(executor)
        .await
}
