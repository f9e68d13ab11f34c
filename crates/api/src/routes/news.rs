//! Route definitions for news articles.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// News routes mounted at `/news`.
///
/// ```text
/// GET    /{id}              -> get_news
/// PUT    /{id}              -> update_news
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(news::get_news).put(news::update_news))
}
