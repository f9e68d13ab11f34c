//! Handlers for categories.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use newsdesk_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// List all categories ordered by name.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: categories }))
}
