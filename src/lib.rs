// MedInsight - terminal client for AI-summarized biomedical literature search

pub mod config;
pub mod i18n;
pub mod models;
pub mod types;
pub mod search;    // API client, form validation and the search reducer
pub mod tui;       // Terminal User Interface
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::{Article, SearchRequest};
pub use types::{ApiError, ApiResult, FormError};
