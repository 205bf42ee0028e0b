//! Search form model
//!
//! Holds the raw text of the three inputs and turns them into a validated
//! [`SearchRequest`]. The article count is clamped into [1, 50] on every edit
//! (an emptied field submits as 1); the keyword and year range are checked on
//! submit.

use crate::models::{
    SearchRequest, DEFAULT_ARTICLE_COUNT, MAX_ARTICLE_COUNT, MAX_TIME_RANGE_YEARS,
    MIN_ARTICLE_COUNT, MIN_TIME_RANGE_YEARS,
};
use crate::types::FormError;
use validator::Validate;

/// Input fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Keyword,
    ArticleCount,
    Years,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Keyword => FormField::ArticleCount,
            FormField::ArticleCount => FormField::Years,
            FormField::Years => FormField::Keyword,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Keyword => FormField::Years,
            FormField::ArticleCount => FormField::Keyword,
            FormField::Years => FormField::ArticleCount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    keyword: String,
    /// Digits as typed; empty while the user is retyping the count
    count_text: String,
    years: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new(DEFAULT_ARTICLE_COUNT)
    }
}

/// Longest accepted input for a numeric field
const COUNT_DIGITS: usize = 2;
const YEARS_DIGITS: usize = 3;

impl SearchForm {
    pub fn new(default_count: u32) -> Self {
        Self {
            keyword: String::new(),
            count_text: clamp_count(default_count).to_string(),
            years: String::new(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Count that would be submitted; an empty field counts as the minimum
    pub fn article_count(&self) -> u32 {
        self.count_text
            .parse::<u32>()
            .map(clamp_count)
            .unwrap_or(MIN_ARTICLE_COUNT)
    }

    pub fn count_text(&self) -> &str {
        &self.count_text
    }

    pub fn years_text(&self) -> &str {
        &self.years
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    /// Set the count from raw text. Non-digits are dropped and any number is
    /// clamped into [1, 50]; text without digits leaves the field empty.
    pub fn set_article_count_text(&mut self, text: &str) {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        self.count_text = normalize_count(&digits);
    }

    pub fn set_years_text(&mut self, text: impl Into<String>) {
        self.years = text.into();
    }

    /// Type one character into a numeric field; non-digits are dropped
    pub fn push_digit(&mut self, field: FormField, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        match field {
            FormField::Keyword => {}
            FormField::ArticleCount => {
                if self.count_text.len() < COUNT_DIGITS {
                    let mut text = self.count_text.clone();
                    text.push(c);
                    self.count_text = normalize_count(&text);
                }
            }
            FormField::Years => {
                if self.years.len() < YEARS_DIGITS {
                    self.years.push(c);
                }
            }
        }
    }

    /// Delete the last character of a numeric field
    pub fn backspace(&mut self, field: FormField) {
        match field {
            FormField::Keyword => {}
            FormField::ArticleCount => {
                self.count_text.pop();
            }
            FormField::Years => {
                self.years.pop();
            }
        }
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.keyword.trim().is_empty()
    }

    /// Validate the inputs and build the request body
    pub fn to_request(&self) -> Result<SearchRequest, FormError> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(FormError::BlankKeyword);
        }

        let years = match self.years.trim() {
            "" => None,
            text => Some(
                text.parse::<u32>()
                    .map_err(|_| FormError::YearsNotANumber(text.to_string()))?,
            ),
        };

        let request = SearchRequest::new(keyword, self.article_count(), years);
        request.validate().map_err(|errors| {
            let fields = errors.field_errors();
            if fields.contains_key("keyword") {
                FormError::BlankKeyword
            } else if fields.contains_key("article_count") {
                FormError::ArticleCountOutOfRange {
                    min: MIN_ARTICLE_COUNT,
                    max: MAX_ARTICLE_COUNT,
                }
            } else {
                FormError::YearsOutOfRange {
                    min: MIN_TIME_RANGE_YEARS,
                    max: MAX_TIME_RANGE_YEARS,
                }
            }
        })?;

        Ok(request)
    }
}

fn clamp_count(n: u32) -> u32 {
    n.clamp(MIN_ARTICLE_COUNT, MAX_ARTICLE_COUNT)
}

/// Clamp a digit string, keeping an empty one empty
fn normalize_count(digits: &str) -> String {
    if digits.is_empty() {
        return String::new();
    }
    // Too many digits for u32 is still "too many articles"
    let n = digits.parse::<u32>().unwrap_or(MAX_ARTICLE_COUNT);
    clamp_count(n).to_string()
}
