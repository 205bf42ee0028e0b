//! Search Module
//!
//! Everything between the form and the backend:
//! - `form` - raw input fields and their validation
//! - `state` - the search state value and its reducer
//! - `client` - the HTTP client for the analysis endpoint

pub mod client;
pub mod form;
pub mod state;

pub use client::{ArticleAnalyzer, MedInsightClient};
pub use form::{FormField, SearchForm};
pub use state::{RequestId, SearchEffect, SearchEvent, SearchPhase, SearchState};

use crate::models::SearchRequest;
use std::sync::Arc;
use tracing::info;

/// Runs searches to completion against an analyzer.
///
/// Used where nothing else has to happen while a request is pending (the
/// one-shot CLI, tests). The TUI drives the same reducer itself so it can
/// keep rendering.
pub struct SearchController<A: ArticleAnalyzer> {
    analyzer: Arc<A>,
    state: SearchState,
}

impl<A: ArticleAnalyzer> SearchController<A> {
    pub fn new(analyzer: Arc<A>) -> Self {
        Self {
            analyzer,
            state: SearchState::new(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Submit a request and wait for the outcome
    pub async fn search(&mut self, request: SearchRequest) -> &SearchState {
        let effect = self.apply(SearchEvent::Submit(request));

        if let Some(SearchEffect::Dispatch { request_id, request }) = effect {
            info!(request_id, keyword = %request.keyword, "Dispatching search");
            let outcome = self.analyzer.analyze(&request).await;
            self.apply(SearchEvent::Completed { request_id, outcome });
        }

        &self.state
    }

    fn apply(&mut self, event: SearchEvent) -> Option<SearchEffect> {
        let (next, effect) = std::mem::take(&mut self.state).reduce(event);
        self.state = next;
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;
    use crate::types::{ApiError, ApiResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a canned outcome
    struct StubAnalyzer {
        calls: Mutex<Vec<SearchRequest>>,
        outcome: ApiResult<Vec<Article>>,
    }

    #[async_trait]
    impl ArticleAnalyzer for StubAnalyzer {
        async fn analyze(&self, request: &SearchRequest) -> ApiResult<Vec<Article>> {
            self.calls.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_search_calls_analyzer_once() {
        let stub = Arc::new(StubAnalyzer {
            calls: Mutex::new(Vec::new()),
            outcome: Ok(vec![Article {
                pmid: "42".to_string(),
                ..Default::default()
            }]),
        });
        let mut controller = SearchController::new(stub.clone());

        let request = SearchRequest::new("diabetic retinopathy treatment", 5, None);
        let state = controller.search(request.clone()).await;

        assert_eq!(state.phase(), SearchPhase::Loaded);
        assert_eq!(state.articles().len(), 1);
        assert_eq!(*stub.calls.lock().unwrap(), vec![request]);
    }

    #[tokio::test]
    async fn test_search_failure() {
        let stub = Arc::new(StubAnalyzer {
            calls: Mutex::new(Vec::new()),
            outcome: Err(ApiError::RequestFailed {
                status: Some(500),
                message: Some("upstream timeout".to_string()),
            }),
        });
        let mut controller = SearchController::new(stub);

        let state = controller.search(SearchRequest::new("asthma", 3, Some(2))).await;
        assert_eq!(state.phase(), SearchPhase::Failed);
        assert_eq!(state.error_message("fallback"), Some("upstream timeout"));
        assert!(!state.is_loading());
    }
}
