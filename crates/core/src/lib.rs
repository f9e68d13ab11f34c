//! Domain types and rules for the newsdesk backend.
//!
//! This crate performs no I/O. It is shared by the persistence layer and the
//! HTTP layer.

pub mod error;
pub mod news;
pub mod types;
