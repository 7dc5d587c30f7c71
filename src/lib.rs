//! Sauna booking server
//!
//! Keeps the hourly slot schedule of a single sauna in memory. Visitors read
//! free dates and reserve slots over a REST JSON API; the administrator
//! builds and edits the schedule through a Telegram bot.

use std::sync::Arc;

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod telegram;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across HTTP handlers and the chat bot
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build state over a fresh, empty repository
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository::Repository::new())),
        }
    }
}
