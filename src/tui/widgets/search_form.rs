//! Search Form Widget
//!
//! Keyword, article count and year range inputs plus the submit button.

use crate::search::FormField;
use crate::tui::app::{App, Focus};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the rendered form, borders included
pub const FORM_HEIGHT: u16 = 7;

/// Render the search form
pub fn render_search_form(frame: &mut Frame, area: Rect, app: &App) {
    let strings = app.strings;
    let form_focused = matches!(app.focus, Focus::Form(_));

    let block = Block::default()
        .title(format!(" {} ", strings.form_title))
        .borders(Borders::ALL)
        .border_style(if form_focused && !app.is_loading() {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keyword label
            Constraint::Length(1), // Keyword input
            Constraint::Length(1), // Count / years labels
            Constraint::Length(1), // Count / years values
            Constraint::Length(1), // Submit
        ])
        .split(inner);

    let focused = |field: FormField| app.focus == Focus::Form(field) && !app.is_loading();

    frame.render_widget(
        Paragraph::new(label_line(strings.keyword_label, focused(FormField::Keyword))),
        rows[0],
    );
    let keyword_area = Rect {
        x: rows[1].x + 2,
        width: rows[1].width.saturating_sub(2),
        ..rows[1]
    };
    frame.render_widget(&app.keyword_input, keyword_area);

    let columns = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };
    let labels = columns(rows[2]);
    let values = columns(rows[3]);

    frame.render_widget(
        Paragraph::new(label_line(strings.count_label, focused(FormField::ArticleCount))),
        labels[0],
    );
    frame.render_widget(
        Paragraph::new(label_line(strings.years_label, focused(FormField::Years))),
        labels[1],
    );

    frame.render_widget(
        Paragraph::new(value_line(
            app.form.count_text(),
            "1",
            focused(FormField::ArticleCount),
        )),
        values[0],
    );
    frame.render_widget(
        Paragraph::new(value_line(
            app.form.years_text(),
            strings.years_placeholder,
            focused(FormField::Years),
        )),
        values[1],
    );

    let (label, style) = if app.is_loading() {
        (strings.submitting, Theme::button_disabled())
    } else if app.form.can_submit() {
        (strings.submit, Theme::button())
    } else {
        (strings.submit, Theme::button_disabled())
    };
    let button = Line::from(vec![
        Span::raw("  "),
        Span::styled(format!(" {} ", label), style),
        Span::styled("  [Enter]", Theme::text_dim()),
    ]);
    frame.render_widget(Paragraph::new(button), rows[4]);
}

fn label_line(label: &str, focused: bool) -> Line<'static> {
    let marker = if focused { Icons::SELECTED } else { " " };
    let style = if focused {
        Theme::shortcut_key()
    } else {
        Theme::text_secondary()
    };
    Line::from(vec![
        Span::styled(format!("{} ", marker), style),
        Span::styled(label.to_string(), style),
    ])
}

fn value_line(value: &str, placeholder: &str, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    if value.is_empty() {
        spans.push(Span::styled(placeholder.to_string(), Theme::placeholder()));
    } else {
        spans.push(Span::styled(value.to_string(), Theme::text()));
    }
    if focused {
        spans.push(Span::styled(Icons::CURSOR, Theme::active()));
    }
    Line::from(spans)
}
