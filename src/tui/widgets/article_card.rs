//! Article Card Widget
//!
//! Builds the lines of one result card. The result list is a single
//! scrollable paragraph, so cards are plain `Line`s rather than widgets; the
//! same builder is used for layout (scroll bounds) and rendering.

use crate::i18n::Strings;
use crate::models::Article;
use crate::tui::theme::{Icons, Theme};
use ratatui::text::{Line, Span};

const INDENT: &str = "    ";

/// Lines for one card, wrapped to `width` columns
pub fn card_lines(
    article: &Article,
    index: usize,
    expanded: bool,
    selected: bool,
    width: u16,
    strings: &Strings,
) -> Vec<Line<'static>> {
    let width = width as usize;
    let body_width = width.saturating_sub(INDENT.len()).max(10);
    let mut lines = Vec::new();

    // Title
    let marker = if selected { Icons::SELECTED } else { " " };
    let title_style = if selected {
        Theme::card_title_selected()
    } else {
        Theme::card_title()
    };
    let title = placeholder(article.display_title(), strings.unknown);
    let prefix = format!("{} {}. ", marker, index + 1);
    for (i, chunk) in wrap_text(title, width.saturating_sub(prefix.chars().count()).max(10))
        .into_iter()
        .enumerate()
    {
        let lead = if i == 0 {
            prefix.clone()
        } else {
            " ".repeat(prefix.chars().count())
        };
        lines.push(Line::from(vec![
            Span::styled(lead, title_style),
            Span::styled(chunk, title_style),
        ]));
    }
    if let Some(original) = article.original_title() {
        push_wrapped(&mut lines, original, body_width, Theme::text_secondary());
    }

    // Metadata
    let authors = if article.authors.is_empty() {
        strings.unknown.to_string()
    } else {
        article.authors.join(", ")
    };
    push_labeled(&mut lines, strings.authors, &authors, body_width, Theme::text());
    push_labeled(
        &mut lines,
        strings.published,
        placeholder(&article.publication_date, strings.unknown),
        body_width,
        Theme::text(),
    );
    if let Some(doi) = article.doi() {
        push_labeled(&mut lines, strings.doi, doi, body_width, Theme::link());
    }
    let identifier = match (article.pmid.trim(), article.pubmed_url.trim()) {
        ("", "") => strings.unknown.to_string(),
        (id, "") => id.to_string(),
        ("", url) => url.to_string(),
        (id, url) => format!("{}  {}", id, url),
    };
    push_labeled(&mut lines, strings.identifier, &identifier, body_width, Theme::link());

    // Summary
    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(strings.summary.to_string(), Theme::heading()),
    ]));
    push_wrapped(
        &mut lines,
        placeholder(&article.summary_tr, strings.unknown),
        body_width,
        Theme::text(),
    );

    // Key takeaways
    if !article.key_takeaways_tr.is_empty() {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(strings.key_takeaways.to_string(), Theme::heading()),
        ]));
        for takeaway in &article.key_takeaways_tr {
            let bullet = format!("{} ", Icons::BULLET);
            for (i, chunk) in wrap_text(takeaway, body_width.saturating_sub(2).max(10))
                .into_iter()
                .enumerate()
            {
                let lead = if i == 0 { bullet.clone() } else { "  ".to_string() };
                lines.push(Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(lead, Theme::text_secondary()),
                    Span::styled(chunk, Theme::text()),
                ]));
            }
        }
    }

    // Expandable abstract
    let (icon, label) = if expanded {
        (Icons::EXPANDED, strings.hide_abstract)
    } else {
        (Icons::COLLAPSED, strings.show_abstract)
    };
    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(format!("{} {}", icon, label), Theme::shortcut_key()),
        Span::styled(" [Space]", Theme::text_dim()),
    ]));
    if expanded {
        push_wrapped(
            &mut lines,
            placeholder(&article.abstract_tr, strings.unknown),
            body_width,
            Theme::text_secondary(),
        );
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(width.max(1)),
        Theme::border(),
    )));

    lines
}

fn placeholder<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn push_labeled(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    width: usize,
    style: ratatui::style::Style,
) {
    let head = format!("{}: ", label);
    let head_len = head.chars().count();
    for (i, chunk) in wrap_text(value, width.saturating_sub(head_len).max(10))
        .into_iter()
        .enumerate()
    {
        let lead = if i == 0 {
            Span::styled(head.clone(), Theme::label())
        } else {
            Span::raw(" ".repeat(head_len))
        };
        lines.push(Line::from(vec![Span::raw(INDENT), lead, Span::styled(chunk, style)]));
    }
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: ratatui::style::Style) {
    for chunk in wrap_text(text, width) {
        lines.push(Line::from(vec![Span::raw(INDENT), Span::styled(chunk, style)]));
    }
}

/// Wrap text to `max_width` characters, preferring to break after
/// whitespace or punctuation. Blank input lines are kept.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut out = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            out.push(String::new());
            continue;
        }

        let mut remaining = line.trim_end();
        while !remaining.is_empty() {
            if remaining.chars().count() <= max_width {
                out.push(remaining.to_string());
                break;
            }

            // Last break candidate within the width
            let mut break_byte = None;
            for (seen, (idx, ch)) in remaining.char_indices().enumerate() {
                if seen >= max_width {
                    break;
                }
                if ch.is_whitespace() || ch == ',' || ch == '.' || ch == ';' {
                    break_byte = Some(idx + ch.len_utf8());
                }
            }
            // No candidate: hard split at the width
            let split_at = break_byte.unwrap_or_else(|| {
                remaining
                    .char_indices()
                    .nth(max_width)
                    .map(|(idx, _)| idx)
                    .unwrap_or(remaining.len())
            });

            let (chunk, rest) = remaining.split_at(split_at);
            out.push(chunk.trim_end().to_string());
            remaining = rest.trim_start();
        }
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}
