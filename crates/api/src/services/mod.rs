//! Application services that orchestrate domain rules over a persistence
//! gateway.

pub mod update_news;

pub use update_news::{UpdateNewsError, UpdateNewsService};
