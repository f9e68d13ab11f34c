pub mod categories;
pub mod health;
pub mod news;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /news/{id}                 get, update
/// /categories                list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/news", news::router())
        .nest("/categories", categories::router())
}
