use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

const BOARD_HINT: &str = "\u{2190}\u{2192} lanes | a add | e edit | i desc | t tags | u due | d del | m move | / search | F5 refresh | ? help | q quit";
const FILTER_HINT: &str = "/ search | Esc clear filter | F5 refresh | ? help | q quit";
const SEARCH_HINT: &str = "Enter apply  Esc clear";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let line = match (app.mode, &app.filter) {
        (Mode::Search, _) => {
            // Search prompt: Search: pattern▌
            let (before, after) = app
                .search_input
                .split_at(app.edit_cursor.min(app.search_input.len()));
            let text = Style::default().fg(app.theme.text_bright).bg(bg);
            let mut spans = vec![
                Span::styled(" Search: ", text.add_modifier(Modifier::BOLD)),
                Span::styled(before.to_string(), text),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
                Span::styled(after.to_string(), text),
            ];
            spans.push(Span::styled(format!("   {}", SEARCH_HINT), dim));
            Line::from(spans)
        }
        (_, Some(filter)) => Line::from(vec![
            Span::styled(
                format!(" Filter: \"{}\"", filter),
                Style::default().fg(app.theme.search_match_bg).bg(bg),
            ),
            Span::styled(format!("  |  {}", FILTER_HINT), dim),
        ]),
        (_, None) => Line::from(Span::styled(format!(" {}", BOARD_HINT), dim)),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
