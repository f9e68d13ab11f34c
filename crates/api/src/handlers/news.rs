//! Handlers for news articles.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use newsdesk_core::error::CoreError;
use newsdesk_core::news::ENTITY_NEWS;
use newsdesk_core::types::EntityId;
use newsdesk_db::gateway::PgNewsGateway;
use newsdesk_db::models::news::UpdateNews;
use newsdesk_db::repositories::NewsRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::services::UpdateNewsService;
use crate::state::AppState;

/// GET /api/v1/news/{id}
///
/// Return a news article with its categories.
pub async fn get_news(
    State(state): State<AppState>,
    Path(news_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let news = NewsRepo::find_by_id_with_categories(&state.pool, news_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_NEWS,
            id: news_id,
        }))?;

    Ok(Json(DataResponse { data: news }))
}

/// PUT /api/v1/news/{id}
///
/// Overwrite the article's fields, detach `categories_to_remove`, and attach
/// `category_ids`. Responds 409 if any of `category_ids` is already attached.
pub async fn update_news(
    State(state): State<AppState>,
    Path(news_id): Path<EntityId>,
    Json(input): Json<UpdateNews>,
) -> AppResult<impl IntoResponse> {
    let service = UpdateNewsService::new(PgNewsGateway::new(state.pool.clone()));
    let news = service.execute(news_id, &input).await?;

    tracing::info!(
        news_id = %news_id,
        categories = news.categories.len(),
        "News updated",
    );

    Ok(Json(DataResponse { data: news }))
}
