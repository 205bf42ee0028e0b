//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::search::SearchPhase;
use crate::tui::app::{ApiStatus, App, Focus, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets::{self, article_card};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Screen regions for the current state
struct MainLayout {
    header: Rect,
    form: Rect,
    notice: Rect,
    results: Rect,
    status: Rect,
}

fn split(area: Rect, app: &App) -> MainLayout {
    let notice_height = if app.is_loading() {
        3
    } else if current_error(app).is_some() {
        4
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                    // Header
            Constraint::Length(widgets::FORM_HEIGHT), // Form
            Constraint::Length(notice_height),        // Loading / error
            Constraint::Min(3),                       // Results
            Constraint::Length(1),                    // Status bar
        ])
        .split(area);

    MainLayout {
        header: chunks[0],
        form: chunks[1],
        notice: chunks[2],
        results: chunks[3],
        status: chunks[4],
    }
}

fn results_block(app: &App) -> Block<'static> {
    let title = if app.search().phase() == SearchPhase::Loaded && !app.search().articles().is_empty() {
        format!(" {} ", app.strings.results_banner(app.search().articles().len()))
    } else {
        format!(" {} ", app.strings.results_title)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::Results {
            Theme::border_focused()
        } else {
            Theme::border()
        })
}

/// Inner size of the result list for a terminal of the given size
pub fn results_viewport(area: Rect, app: &App) -> Rect {
    results_block(app).inner(split(area, app).results)
}

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let layout = split(frame.area(), app);

    render_header(frame, layout.header, app);
    widgets::render_search_form(frame, layout.form, app);
    if app.is_loading() {
        widgets::render_loading(frame, layout.notice, app.spinner_frame, app.strings.loading);
    } else if let Some(message) = current_error(app) {
        render_error(frame, layout.notice, app, message);
    }
    render_results(frame, layout.results, app);
    render_status_bar(frame, layout.status, app);

    if app.view == View::Help {
        render_help(frame, app);
    }
}

/// Form validation errors take precedence over the last search failure
fn current_error(app: &App) -> Option<String> {
    if let Some(form_error) = &app.form_error {
        return Some(app.strings.form_error(form_error));
    }
    app.search()
        .error_message(app.strings.fallback_error)
        .map(String::from)
}

/// Render the header with the backend status indicator
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let dot_style = match app.api_status {
        ApiStatus::Online => Theme::complete(),
        ApiStatus::Offline => Theme::error(),
        ApiStatus::Unknown => Theme::text_dim(),
    };

    let title_text = vec![Line::from(vec![
        Span::raw("🧬 "),
        Span::styled(app.strings.app_title, Theme::title()),
        Span::styled(format!(" {}", app.strings.app_subtitle), Theme::text_secondary()),
        Span::raw("  "),
        Span::styled(Icons::DOT, dot_style),
        Span::styled(format!(" {}", app.config.api.base_url), Theme::text_dim()),
    ])];

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .style(Style::default()),
        );

    frame.render_widget(title, area);
}

fn render_error(frame: &mut Frame, area: Rect, app: &App, message: String) {
    let lines = vec![
        Line::from(Span::styled(app.strings.error_heading, Theme::error_heading())),
        Line::from(Span::styled(message, Theme::error())),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_error()),
        );
    frame.render_widget(paragraph, area);
}

/// Render the result list or the matching empty state
fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let block = results_block(app);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.is_loading() {
        return;
    }

    let articles = app.search().articles();
    if articles.is_empty() {
        let message = match app.search().phase() {
            SearchPhase::Loaded => app.strings.no_results,
            SearchPhase::Failed => return,
            _ => app.strings.empty_hint,
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, Theme::text_secondary())))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    let selected = if app.focus == Focus::Results {
        Some(app.selected)
    } else {
        None
    };

    let mut lines: Vec<Line> = Vec::new();
    for (index, article) in articles.iter().enumerate() {
        lines.extend(article_card::card_lines(
            article,
            index,
            app.is_expanded(index),
            selected == Some(index),
            inner.width,
            app.strings,
        ));
    }

    let paragraph = Paragraph::new(lines).scroll((app.scroll_offset, 0));
    frame.render_widget(paragraph, inner);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let strings = app.strings;
    let status = match app.search().phase() {
        SearchPhase::Idle => Span::styled(strings.ready, Theme::text_secondary()),
        SearchPhase::Loading => Span::styled(format!("{}...", strings.searching), Theme::active()),
        SearchPhase::Loaded => {
            let at = app
                .search()
                .completed_at()
                .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
                .unwrap_or_default();
            Span::styled(format!("{} {}", strings.completed_at, at), Theme::complete())
        }
        SearchPhase::Failed => Span::styled(strings.failed, Theme::error()),
    };

    let shortcuts = [
        ("[Enter]", strings.shortcut_search),
        ("[Tab]", strings.shortcut_next),
        ("[Space]", strings.shortcut_expand),
        ("[Ctrl+Q]", strings.shortcut_quit),
        ("[F1]", strings.shortcut_help),
    ]
    .into_iter()
    .flat_map(|(key, desc)| {
        [
            Span::styled(format!(" {}", key), Theme::shortcut_key()),
            Span::styled(format!(" {}", desc), Theme::shortcut_desc()),
        ]
    });

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame, app: &App) {
    let strings = app.strings;
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let mut help_lines = vec![
        Line::from(Span::styled(strings.help_heading, Theme::heading())),
        Line::from(""),
    ];
    help_lines.extend(strings.help_entries.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("{:<13}", key), Theme::shortcut_key()),
            Span::styled(*desc, Theme::text()),
        ])
    }));
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(strings.help_close, Theme::text_dim())));

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(format!(" {} ", strings.help_title))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Article, SearchRequest};
    use crate::search::ArticleAnalyzer;
    use crate::tui::app::AppEvent;
    use crate::types::{ApiError, ApiResult, FormError};
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    struct NoopAnalyzer;

    #[async_trait]
    impl ArticleAnalyzer for NoopAnalyzer {
        async fn analyze(&self, _request: &SearchRequest) -> ApiResult<Vec<Article>> {
            Ok(Vec::new())
        }
    }

    fn new_app() -> App {
        App::new(Config::default(), Arc::new(NoopAnalyzer))
    }

    /// Submit the form; the background result is never polled, so the app
    /// stays loading until `finish` is called
    fn start_search(app: &mut App) {
        app.form.set_keyword("diabetic retinopathy treatment");
        app.submit();
        assert!(app.is_loading());
    }

    fn finish(app: &mut App, outcome: Result<Vec<Article>, ApiError>) {
        app.handle_event(AppEvent::SearchFinished {
            request_id: 1,
            outcome,
        });
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(120, 60);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn article(pmid: &str, title: &str) -> Article {
        Article {
            pmid: pmid.to_string(),
            title_tr: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_screen_shows_hint() {
        let screen = render_to_string(&new_app());
        assert!(screen.contains("Use the form above to search for articles."));
        assert!(screen.contains("Search Articles"));
    }

    #[tokio::test]
    async fn test_loading_screen() {
        let mut app = new_app();
        start_search(&mut app);
        let screen = render_to_string(&app);
        assert!(screen.contains("Analyzing articles, please wait..."));
        assert!(screen.contains("Searching..."));
    }

    #[tokio::test]
    async fn test_results_banner_and_cards_in_order() {
        let mut app = new_app();
        start_search(&mut app);
        finish(
            &mut app,
            Ok(vec![
                article("1", "Birinci makale"),
                article("2", "Ikinci makale"),
                article("3", "Ucuncu makale"),
            ]),
        );

        let screen = render_to_string(&app);
        assert!(screen.contains("3 articles found"));
        let first = screen.find("Birinci makale").unwrap();
        let second = screen.find("Ikinci makale").unwrap();
        let third = screen.find("Ucuncu makale").unwrap();
        assert!(first < second && second < third);
    }

    #[tokio::test]
    async fn test_empty_result_shows_no_results_not_error() {
        let mut app = new_app();
        start_search(&mut app);
        finish(&mut app, Ok(Vec::new()));

        let screen = render_to_string(&app);
        assert!(screen.contains("No articles matched this search."));
        assert!(!screen.contains("Error:"));
    }

    #[tokio::test]
    async fn test_error_detail_shown_verbatim() {
        let mut app = new_app();
        start_search(&mut app);
        finish(
            &mut app,
            Err(ApiError::RequestFailed {
                status: Some(500),
                message: Some("Hiçbir makale başarıyla işlenemedi.".to_string()),
            }),
        );

        let screen = render_to_string(&app);
        assert!(screen.contains("Error:"));
        assert!(screen.contains("Hiçbir makale başarıyla işlenemedi."));
    }

    #[tokio::test]
    async fn test_error_without_message_uses_fallback() {
        let mut app = new_app();
        start_search(&mut app);
        finish(
            &mut app,
            Err(ApiError::RequestFailed {
                status: Some(502),
                message: None,
            }),
        );

        let screen = render_to_string(&app);
        assert!(screen.contains("An error occurred. Please try again."));
    }

    #[test]
    fn test_form_error_shown() {
        let mut app = new_app();
        app.form_error = Some(FormError::BlankKeyword);
        let screen = render_to_string(&app);
        assert!(screen.contains("Keyword must not be empty"));
    }

    #[test]
    fn test_turkish_locale_labels() {
        let mut config = Config::default();
        config.ui.locale = crate::i18n::Locale::Tr;
        let mut app = App::new(config, Arc::new(NoopAnalyzer));
        app.form_error = Some(FormError::BlankKeyword);

        let screen = render_to_string(&app);
        assert!(screen.contains("Sonuçlar"));
        assert!(screen.contains("Arama"));
        assert!(screen.contains("Yardım"));
        assert!(screen.contains("Anahtar kelime boş olamaz"));
        assert!(!screen.contains("Keyword must not be empty"));

        app.view = View::Help;
        let screen = render_to_string(&app);
        assert!(screen.contains("Klavye Kısayolları"));
        assert!(screen.contains("Kapatmak için bir tuşa basın"));
    }

    #[test]
    fn test_results_viewport_fits_inside_terminal() {
        let app = new_app();
        let area = Rect::new(0, 0, 100, 40);
        let viewport = results_viewport(area, &app);
        assert!(viewport.width <= 98);
        assert!(viewport.height > 0);
    }
}
