//! EquipTrack Equipment Tracking System
//!
//! A Rust server for tracking field inspection equipment: every item's
//! assignment/return lifecycle runs through transactional, concurrency-safe
//! operations that keep an append-only audit history.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
