//! Pelagos Cetacean Encyclopedia Server
//!
//! A Rust implementation of the Pelagos encyclopedia server, providing a
//! REST JSON API over a small set of durable records: the visit counter,
//! the weekly search tally, the guestbook log and the account directory.

use std::sync::Arc;

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
