//! Application State
//!
//! Contains the main application state and logic for the TUI.

use crate::config::Config;
use crate::i18n::Strings;
use crate::models::{Article, SearchRequest};
use crate::search::{
    ArticleAnalyzer, FormField, RequestId, SearchEffect, SearchEvent, SearchForm, SearchState,
};
use crate::tui::event::AppAction;
use crate::tui::widgets::article_card;
use crate::types::{ApiError, FormError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_textarea::TextArea;

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(FormField),
    Results,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Form(FormField::Keyword)
    }
}

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Search,
    Help,
}

/// Backend reachability, shown as a dot in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

/// Identity of a result card across renders.
///
/// Cards are keyed by the article identifier plus how many earlier cards in
/// the list carry the same identifier, so a repeated pmid still gets its own
/// expansion state. Articles without an identifier fall back to their position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardKey {
    Id { id: String, occurrence: usize },
    Position(usize),
}

impl CardKey {
    pub fn for_article(index: usize, articles: &[Article]) -> Option<Self> {
        let id = articles.get(index)?.pmid.trim();
        if id.is_empty() {
            return Some(CardKey::Position(index));
        }
        let occurrence = articles[..index]
            .iter()
            .filter(|other| other.pmid.trim() == id)
            .count();
        Some(CardKey::Id {
            id: id.to_string(),
            occurrence,
        })
    }
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// The in-flight search finished
    SearchFinished {
        request_id: RequestId,
        outcome: Result<Vec<Article>, ApiError>,
    },
    /// Result of the backend health probe
    HealthChecked(ApiStatus),
}

/// Main application state
pub struct App {
    pub config: Config,
    pub strings: &'static Strings,

    // UI State
    pub view: View,
    pub focus: Focus,
    pub should_quit: bool,
    pub api_status: ApiStatus,
    pub spinner_frame: usize,

    // Form State
    pub form: SearchForm,
    pub keyword_input: TextArea<'static>,
    pub form_error: Option<FormError>,

    // Search State
    search: SearchState,
    pub expanded: HashSet<CardKey>,
    pub selected: usize,
    pub scroll_offset: u16,
    pub max_scroll: u16,
    /// First line of each card in the rendered result list
    card_offsets: Vec<u16>,

    analyzer: Arc<dyn ArticleAnalyzer>,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, analyzer: Arc<dyn ArticleAnalyzer>) -> Self {
        let strings = config.ui.locale.strings();
        let (tx, rx) = mpsc::channel(16);

        Self {
            form: SearchForm::new(config.search.article_count),
            keyword_input: Self::new_keyword_input(strings),
            config,
            strings,
            view: View::Search,
            focus: Focus::default(),
            should_quit: false,
            api_status: ApiStatus::Unknown,
            spinner_frame: 0,
            form_error: None,
            search: SearchState::new(),
            expanded: HashSet::new(),
            selected: 0,
            scroll_offset: 0,
            max_scroll: 0,
            card_offsets: Vec::new(),
            analyzer,
            event_rx: rx,
            event_tx: tx,
        }
    }

    fn new_keyword_input(strings: &Strings) -> TextArea<'static> {
        let mut input = TextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_placeholder_text(strings.keyword_placeholder);
        input
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn is_loading(&self) -> bool {
        self.search.is_loading()
    }

    /// Sender for background tasks reporting back to the UI
    pub fn event_sender(&self) -> mpsc::Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Poll for async events
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Handle an async event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchFinished { request_id, outcome } => {
                if let Err(e) = &outcome {
                    warn!(request_id, error = %e, "Search failed");
                }
                let was_loading = self.is_loading();
                self.apply(SearchEvent::Completed { request_id, outcome });
                if !was_loading || self.is_loading() {
                    // stale result, nothing changed
                    return;
                }
                self.expanded.clear();
                self.selected = 0;
                self.scroll_offset = 0;
                if !self.search.articles().is_empty() {
                    self.focus = Focus::Results;
                }
            }
            AppEvent::HealthChecked(status) => {
                self.api_status = status;
            }
        }
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        if self.view == View::Help {
            // Any key closes help
            if !matches!(action, AppAction::Tick) {
                self.view = View::Search;
            }
            return;
        }

        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::Submit => match self.focus {
                Focus::Form(_) => self.submit(),
                Focus::Results => self.toggle_selected(),
            },
            AppAction::ToggleHelp => {
                self.view = View::Help;
            }
            AppAction::Escape => {
                self.focus = Focus::Form(FormField::Keyword);
                self.form_error = None;
            }
            AppAction::Up => match self.focus {
                Focus::Results => self.select_previous(),
                Focus::Form(field) => self.focus = Focus::Form(field.prev()),
            },
            AppAction::Down => match self.focus {
                Focus::Results => self.select_next(),
                Focus::Form(field) => self.focus = Focus::Form(field.next()),
            },
            AppAction::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
            }
            AppAction::PageDown => {
                self.scroll_offset = (self.scroll_offset + 10).min(self.max_scroll);
            }
            AppAction::NextField => self.cycle_focus(true),
            AppAction::PrevField => self.cycle_focus(false),
            AppAction::DeleteKey => {
                if let Focus::Form(field) = self.focus {
                    self.edit_field(field, KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
                }
            }
            AppAction::Input(key) => self.handle_input(key),
            AppAction::Tick => {
                if self.is_loading() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
            }
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let has_results = !self.search.articles().is_empty();
        self.focus = match (self.focus, forward) {
            (Focus::Form(FormField::Years), true) if has_results => Focus::Results,
            (Focus::Form(FormField::Keyword), false) if has_results => Focus::Results,
            (Focus::Form(field), true) => Focus::Form(field.next()),
            (Focus::Form(field), false) => Focus::Form(field.prev()),
            (Focus::Results, true) => Focus::Form(FormField::Keyword),
            (Focus::Results, false) => Focus::Form(FormField::Years),
        };
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::Results => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Char('x')) {
                    self.toggle_selected();
                }
            }
            Focus::Form(field) => self.edit_field(field, key),
        }
    }

    /// Edit a form field; the whole form is read-only while a search runs
    fn edit_field(&mut self, field: FormField, key: KeyEvent) {
        if self.is_loading() {
            return;
        }
        self.form_error = None;

        match field {
            FormField::Keyword => {
                self.keyword_input.input(key);
                self.form.set_keyword(self.keyword_input.lines().join(" "));
            }
            FormField::ArticleCount | FormField::Years => match key.code {
                KeyCode::Char(c) => self.form.push_digit(field, c),
                KeyCode::Backspace => self.form.backspace(field),
                _ => {}
            },
        }
    }

    /// Validate the form and start a search
    pub fn submit(&mut self) {
        if self.is_loading() {
            debug!("Submit ignored, search in progress");
            return;
        }

        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Form rejected");
                self.form_error = Some(e);
                return;
            }
        };
        self.form_error = None;

        if let Some(SearchEffect::Dispatch { request_id, request }) =
            self.apply(SearchEvent::Submit(request))
        {
            self.expanded.clear();
            self.selected = 0;
            self.scroll_offset = 0;
            self.dispatch(request_id, request);
        }
    }

    /// Run the request on a background task and report back through the channel
    fn dispatch(&self, request_id: RequestId, request: SearchRequest) {
        info!(request_id, keyword = %request.keyword, article_count = request.article_count, "Starting search");

        let analyzer = Arc::clone(&self.analyzer);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let outcome = analyzer.analyze(&request).await;
            tx.send(AppEvent::SearchFinished { request_id, outcome })
                .await
                .ok();
        });
    }

    fn apply(&mut self, event: SearchEvent) -> Option<SearchEffect> {
        let (next, effect) = std::mem::take(&mut self.search).reduce(event);
        self.search = next;
        effect
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        CardKey::for_article(index, self.search.articles())
            .map(|key| self.expanded.contains(&key))
            .unwrap_or(false)
    }

    /// Flip one card between collapsed and expanded
    pub fn toggle_card(&mut self, index: usize) {
        let Some(key) = CardKey::for_article(index, self.search.articles()) else {
            return;
        };
        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
    }

    fn toggle_selected(&mut self) {
        self.toggle_card(self.selected);
    }

    fn select_next(&mut self) {
        let count = self.search.articles().len();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
            self.scroll_to_selected();
        }
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_to_selected();
        }
    }

    fn scroll_to_selected(&mut self) {
        if let Some(&offset) = self.card_offsets.get(self.selected) {
            self.scroll_offset = offset.min(self.max_scroll);
        }
    }

    /// Recompute card positions and scroll bounds for the result viewport
    pub fn update_scroll_bounds(&mut self, viewport_width: u16, viewport_height: u16) {
        let mut offsets = Vec::with_capacity(self.search.articles().len());
        let mut total: u16 = 0;
        for (index, article) in self.search.articles().iter().enumerate() {
            offsets.push(total);
            let lines = article_card::card_lines(
                article,
                index,
                self.is_expanded(index),
                false,
                viewport_width,
                self.strings,
            );
            total = total.saturating_add(lines.len() as u16);
        }
        self.card_offsets = offsets;
        self.max_scroll = total.saturating_sub(viewport_height);
        if self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiResult;
    use async_trait::async_trait;

    struct FixedAnalyzer(Vec<Article>);

    #[async_trait]
    impl ArticleAnalyzer for FixedAnalyzer {
        async fn analyze(&self, _request: &SearchRequest) -> ApiResult<Vec<Article>> {
            Ok(self.0.clone())
        }
    }

    fn article(pmid: &str) -> Article {
        Article {
            pmid: pmid.to_string(),
            title_en: format!("Title {}", pmid),
            ..Default::default()
        }
    }

    fn app_with_results(articles: Vec<Article>) -> App {
        let mut app = App::new(Config::default(), Arc::new(FixedAnalyzer(Vec::new())));
        app.apply(SearchEvent::Submit(SearchRequest::new("test", 5, None)));
        app.handle_event(AppEvent::SearchFinished {
            request_id: 1,
            outcome: Ok(articles),
        });
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(AppAction::Input(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            )));
        }
    }

    #[test]
    fn test_card_key_falls_back_to_position() {
        let articles = vec![article("99"), article("")];
        assert_eq!(
            CardKey::for_article(0, &articles),
            Some(CardKey::Id {
                id: "99".to_string(),
                occurrence: 0
            })
        );
        assert_eq!(CardKey::for_article(1, &articles), Some(CardKey::Position(1)));
        assert_eq!(CardKey::for_article(2, &articles), None);
    }

    #[test]
    fn test_duplicate_ids_expand_independently() {
        let mut app = app_with_results(vec![article("42"), article("7"), article("42")]);

        app.toggle_card(2);
        assert!(app.is_expanded(2));
        assert!(!app.is_expanded(0));

        app.toggle_card(0);
        app.toggle_card(2);
        assert!(app.is_expanded(0));
        assert!(!app.is_expanded(2));
        assert!(!app.is_expanded(1));
    }

    #[test]
    fn test_toggle_twice_restores_collapsed() {
        let mut app = app_with_results(vec![article("1"), article("2"), article("")]);

        app.toggle_card(1);
        assert!(app.is_expanded(1));
        assert!(!app.is_expanded(0));
        assert!(!app.is_expanded(2));

        app.toggle_card(2);
        app.toggle_card(1);
        assert!(!app.is_expanded(1));
        assert!(app.is_expanded(2));
        assert!(!app.is_expanded(0));
    }

    #[test]
    fn test_new_results_reset_expansion() {
        let mut app = app_with_results(vec![article("1")]);
        app.toggle_card(0);
        assert!(app.is_expanded(0));

        app.apply(SearchEvent::Submit(SearchRequest::new("again", 5, None)));
        app.handle_event(AppEvent::SearchFinished {
            request_id: 2,
            outcome: Ok(vec![article("1")]),
        });
        assert!(!app.is_expanded(0));
    }

    #[test]
    fn test_blank_keyword_sets_form_error() {
        let mut app = App::new(Config::default(), Arc::new(FixedAnalyzer(Vec::new())));
        type_text(&mut app, "   ");
        app.handle_action(AppAction::Submit);
        assert_eq!(app.form_error, Some(FormError::BlankKeyword));
        assert!(!app.is_loading());
    }

    #[tokio::test]
    async fn test_submit_runs_search_in_background() {
        let mut app = App::new(
            Config::default(),
            Arc::new(FixedAnalyzer(vec![article("7"), article("8")])),
        );
        type_text(&mut app, "glaucoma");
        assert_eq!(app.form.keyword(), "glaucoma");

        app.handle_action(AppAction::Submit);
        assert!(app.is_loading());

        // Typing is ignored while loading
        type_text(&mut app, "xyz");
        assert_eq!(app.form.keyword(), "glaucoma");

        let event = tokio::time::timeout(std::time::Duration::from_secs(5), app.event_rx.recv())
            .await
            .unwrap()
            .unwrap();
        app.handle_event(event);

        assert!(!app.is_loading());
        assert_eq!(app.search().articles().len(), 2);
        assert_eq!(app.focus, Focus::Results);
    }

    #[test]
    fn test_numeric_fields_via_keys() {
        let mut app = App::new(Config::default(), Arc::new(FixedAnalyzer(Vec::new())));
        app.handle_action(AppAction::NextField);
        assert_eq!(app.focus, Focus::Form(FormField::ArticleCount));
        app.handle_action(AppAction::DeleteKey);
        type_text(&mut app, "80");
        assert_eq!(app.form.article_count(), 50);

        app.handle_action(AppAction::NextField);
        type_text(&mut app, "1a0");
        assert_eq!(app.form.years_text(), "10");
    }

    /// Type a keyword, retype the count through the keys and submit
    fn submit_with_count(app: &mut App, count: &str) -> u32 {
        type_text(app, "optic neuritis");
        app.handle_action(AppAction::NextField);
        app.handle_action(AppAction::DeleteKey);
        assert_eq!(app.form.count_text(), "");
        type_text(app, count);
        app.handle_action(AppAction::Submit);
        assert!(app.is_loading());
        app.search().last_request().unwrap().article_count
    }

    #[tokio::test]
    async fn test_mid_range_counts_entered_by_keys() {
        let mut app = App::new(Config::default(), Arc::new(FixedAnalyzer(Vec::new())));
        assert_eq!(submit_with_count(&mut app, "25"), 25);

        let mut app = App::new(Config::default(), Arc::new(FixedAnalyzer(Vec::new())));
        assert_eq!(submit_with_count(&mut app, "3"), 3);
    }

    #[tokio::test]
    async fn test_emptied_count_submits_minimum() {
        let mut app = App::new(Config::default(), Arc::new(FixedAnalyzer(Vec::new())));
        assert_eq!(submit_with_count(&mut app, ""), 1);
    }

    #[test]
    fn test_results_navigation_and_toggle_with_space() {
        let mut app = app_with_results(vec![article("1"), article("2")]);
        app.update_scroll_bounds(80, 5);
        assert_eq!(app.focus, Focus::Results);

        app.handle_action(AppAction::Down);
        assert_eq!(app.selected, 1);
        app.handle_action(AppAction::Down);
        assert_eq!(app.selected, 1);

        app.handle_action(AppAction::Input(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(app.is_expanded(1));
        app.handle_action(AppAction::Submit);
        assert!(!app.is_expanded(1));

        app.handle_action(AppAction::Up);
        assert_eq!(app.selected, 0);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = App::new(Config::default(), Arc::new(FixedAnalyzer(Vec::new())));
        app.handle_action(AppAction::ToggleHelp);
        assert_eq!(app.view, View::Help);
        app.handle_action(AppAction::Tick);
        assert_eq!(app.view, View::Help);
        app.handle_action(AppAction::Escape);
        assert_eq!(app.view, View::Search);
    }
}
