//! TUI Widgets
//!
//! Custom widgets for the MedInsight TUI.

pub mod article_card;
mod search_form;
mod spinner;

pub use search_form::{render_search_form, FORM_HEIGHT};
pub use spinner::render_loading;
