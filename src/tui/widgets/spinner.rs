//! Loading Widget
//!
//! Shown while the single search request is in flight.

use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the loading indicator
pub fn render_loading(frame: &mut Frame, area: Rect, frame_index: usize, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let line = Line::from(vec![
        Span::styled(spinner_glyph(frame_index), Theme::active()),
        Span::raw(" "),
        Span::styled(message.to_string(), Theme::text_secondary()),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn spinner_glyph(frame_index: usize) -> &'static str {
    Icons::SPINNER[frame_index % Icons::SPINNER.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_glyph(0), spinner_glyph(Icons::SPINNER.len()));
        assert_ne!(spinner_glyph(0), spinner_glyph(1));
    }
}
