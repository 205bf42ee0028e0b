//! Search state and reducer
//!
//! The UI state is a plain value. Every change goes through
//! [`SearchState::reduce`], which returns the next state and, for accepted
//! submissions, the request the caller must dispatch.
//!
//! ```text
//!   Idle/Loaded/Failed --Submit--> Loading --Completed(Ok)--> Loaded
//!                                     |
//!                                     +-----Completed(Err)-> Failed
//! ```
//!
//! A submission while a request is outstanding is ignored, and completions
//! for anything but the in-flight request are dropped.

use crate::models::{Article, SearchRequest};
use crate::types::ApiError;
use chrono::{DateTime, Utc};
use tracing::debug;

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub enum SearchEvent {
    Submit(SearchRequest),
    Completed {
        request_id: RequestId,
        outcome: Result<Vec<Article>, ApiError>,
    },
}

/// Work the caller has to perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    Dispatch {
        request_id: RequestId,
        request: SearchRequest,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    articles: Vec<Article>,
    error: Option<ApiError>,
    in_flight: Option<RequestId>,
    last_request_id: RequestId,
    /// Set once the first search has finished, successfully or not
    completed_at: Option<DateTime<Utc>>,
    last_request: Option<SearchRequest>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Displayed error text, with `fallback` for failures that carried no message
    pub fn error_message<'a>(&'a self, fallback: &'a str) -> Option<&'a str> {
        self.error.as_ref().map(|e| e.message_or(fallback))
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn last_request(&self) -> Option<&SearchRequest> {
        self.last_request.as_ref()
    }

    pub fn phase(&self) -> SearchPhase {
        if self.in_flight.is_some() {
            SearchPhase::Loading
        } else if self.error.is_some() {
            SearchPhase::Failed
        } else if self.completed_at.is_some() {
            SearchPhase::Loaded
        } else {
            SearchPhase::Idle
        }
    }

    /// Apply an event and return the next state plus any effect to run
    pub fn reduce(self, event: SearchEvent) -> (SearchState, Option<SearchEffect>) {
        match event {
            SearchEvent::Submit(request) => {
                if let Some(pending) = self.in_flight {
                    debug!(pending, "Ignoring submission while a search is in flight");
                    return (self, None);
                }

                let request_id = self.last_request_id + 1;
                let next = SearchState {
                    articles: Vec::new(),
                    error: None,
                    in_flight: Some(request_id),
                    last_request_id: request_id,
                    completed_at: self.completed_at,
                    last_request: Some(request.clone()),
                };
                (next, Some(SearchEffect::Dispatch { request_id, request }))
            }
            SearchEvent::Completed { request_id, outcome } => {
                if self.in_flight != Some(request_id) {
                    debug!(request_id, in_flight = ?self.in_flight, "Dropping stale search result");
                    return (self, None);
                }

                let (articles, error) = match outcome {
                    Ok(articles) => (articles, None),
                    Err(e) => (Vec::new(), Some(e)),
                };
                let next = SearchState {
                    articles,
                    error,
                    in_flight: None,
                    completed_at: Some(Utc::now()),
                    ..self
                };
                (next, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(pmid: &str) -> Article {
        Article {
            pmid: pmid.to_string(),
            ..Default::default()
        }
    }

    fn submit(state: SearchState, keyword: &str) -> (SearchState, RequestId) {
        let (state, effect) = state.reduce(SearchEvent::Submit(SearchRequest::new(keyword, 5, None)));
        match effect {
            Some(SearchEffect::Dispatch { request_id, .. }) => (state, request_id),
            None => panic!("expected a dispatch effect"),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = SearchState::new();
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.articles().is_empty());
        assert!(!state.is_loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_submit_enters_loading_and_dispatches_once() {
        let request = SearchRequest::new("diabetic retinopathy treatment", 5, None);
        let (state, effect) = SearchState::new().reduce(SearchEvent::Submit(request.clone()));

        assert_eq!(state.phase(), SearchPhase::Loading);
        assert!(state.is_loading());
        assert_eq!(
            effect,
            Some(SearchEffect::Dispatch {
                request_id: 1,
                request
            })
        );
    }

    #[test]
    fn test_success_stores_articles_in_order() {
        let (state, id) = submit(SearchState::new(), "glaucoma");
        let (state, effect) = state.reduce(SearchEvent::Completed {
            request_id: id,
            outcome: Ok(vec![article("b"), article("a"), article("c")]),
        });

        assert!(effect.is_none());
        assert_eq!(state.phase(), SearchPhase::Loaded);
        let ids: Vec<&str> = state.articles().iter().map(|a| a.pmid.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(state.completed_at().is_some());
    }

    #[test]
    fn test_empty_result_is_loaded_not_failed() {
        let (state, id) = submit(SearchState::new(), "nothing");
        let (state, _) = state.reduce(SearchEvent::Completed {
            request_id: id,
            outcome: Ok(Vec::new()),
        });
        assert_eq!(state.phase(), SearchPhase::Loaded);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_stores_message() {
        let (state, id) = submit(SearchState::new(), "glaucoma");
        let (state, _) = state.reduce(SearchEvent::Completed {
            request_id: id,
            outcome: Err(ApiError::RequestFailed {
                status: Some(500),
                message: Some("X".to_string()),
            }),
        });

        assert_eq!(state.phase(), SearchPhase::Failed);
        assert!(state.articles().is_empty());
        assert_eq!(state.error_message("fallback"), Some("X"));
    }

    #[test]
    fn test_new_submit_clears_previous_results_and_error() {
        let (state, id) = submit(SearchState::new(), "first");
        let (state, _) = state.reduce(SearchEvent::Completed {
            request_id: id,
            outcome: Err(ApiError::transport("boom")),
        });
        let (state, id) = submit(state, "second");
        assert!(state.error().is_none());
        assert!(state.articles().is_empty());

        let (state, _) = state.reduce(SearchEvent::Completed {
            request_id: id,
            outcome: Ok(vec![article("1")]),
        });
        let (state, _) = submit(state, "third");
        assert!(state.articles().is_empty());
        assert_eq!(state.phase(), SearchPhase::Loading);
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let (state, id) = submit(SearchState::new(), "first");
        let (state, effect) = state.reduce(SearchEvent::Submit(SearchRequest::new("second", 5, None)));

        assert!(effect.is_none());
        assert_eq!(state.phase(), SearchPhase::Loading);
        assert_eq!(state.last_request().map(|r| r.keyword.as_str()), Some("first"));

        let (state, _) = state.reduce(SearchEvent::Completed {
            request_id: id,
            outcome: Ok(vec![article("1")]),
        });
        assert_eq!(state.articles().len(), 1);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let (state, first) = submit(SearchState::new(), "first");
        let (state, _) = state.reduce(SearchEvent::Completed {
            request_id: first,
            outcome: Ok(vec![article("1")]),
        });
        let (state, second) = submit(state, "second");
        assert_ne!(first, second);

        let (state, effect) = state.reduce(SearchEvent::Completed {
            request_id: first,
            outcome: Ok(vec![article("stale")]),
        });
        assert!(effect.is_none());
        assert_eq!(state.phase(), SearchPhase::Loading);
        assert!(state.articles().is_empty());
    }
}
