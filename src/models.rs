// Wire models for the analysis endpoint

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MIN_ARTICLE_COUNT: u32 = 1;
pub const MAX_ARTICLE_COUNT: u32 = 50;
pub const DEFAULT_ARTICLE_COUNT: u32 = 5;
pub const MIN_TIME_RANGE_YEARS: u32 = 1;
pub const MAX_TIME_RANGE_YEARS: u32 = 20;

/// Body of `POST /api/analyze_articles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    /// Already trimmed; an empty string means the keyword was blank
    #[validate(length(min = 1))]
    pub keyword: String,
    #[validate(range(min = 1, max = 50))]
    pub article_count: u32,
    /// Serialized as `null` when absent
    #[validate(range(min = 1, max = 20))]
    pub time_range_years: Option<u32>,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>, article_count: u32, time_range_years: Option<u32>) -> Self {
        Self {
            keyword: keyword.into().trim().to_string(),
            article_count,
            time_range_years,
        }
    }
}

/// One analyzed publication as returned by the backend.
///
/// Every field is optional on the wire; missing values come through empty
/// and the card renders a placeholder for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub pmid: String,
    pub title_en: String,
    pub title_tr: String,
    pub authors: Vec<String>,
    pub publication_date: String,
    pub doi: Option<String>,
    pub pubmed_url: String,
    pub summary_tr: String,
    pub key_takeaways_tr: Vec<String>,
    pub abstract_tr: String,
}

impl Article {
    /// Translated title, falling back to the English one
    pub fn display_title(&self) -> &str {
        if self.title_tr.trim().is_empty() {
            &self.title_en
        } else {
            &self.title_tr
        }
    }

    /// English title, only when it adds something over the displayed title
    pub fn original_title(&self) -> Option<&str> {
        let en = self.title_en.trim();
        if en.is_empty() || en == self.display_title().trim() {
            None
        } else {
            Some(&self.title_en)
        }
    }

    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// Error payload of the backend.
///
/// `detail` is a plain string for handled errors and a list of
/// `{loc, msg, type}` objects for request validation failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Most specific message in the body: detail, then error, then message
    pub fn best_message(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(detail_text)
            .or_else(|| non_empty(self.error.as_deref()))
            .or_else(|| non_empty(self.message.as_deref()))
    }
}

fn detail_text(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => non_empty(Some(s)),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(|m| m.as_str()).map(String::from),
                })
                .collect();
            if messages.is_empty() {
                Some(detail.to_string())
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
