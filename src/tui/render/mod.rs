pub mod board_view;
pub mod edit_popup;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use super::app::{App, Mode};

/// Draw the whole board, then any popup for the current mode
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | board | error line | status row
    let error_height = u16::from(app.last_error.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // header
            Constraint::Min(3),               // lanes
            Constraint::Length(error_height), // last error
            Constraint::Length(1),            // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    board_view::render_board(frame, app, chunks[1]);

    if let Some(err) = &app.last_error {
        let line = Line::from(Span::styled(
            format!(" Error: {}", err),
            Style::default()
                .fg(app.theme.red)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), chunks[2]);
    }

    status_row::render_status_row(frame, app, chunks[3]);

    // Popups and overlays (rendered on top of everything)
    match app.mode {
        mode if mode.is_task_edit() => edit_popup::render_edit_popup(frame, app, area),
        Mode::ConfirmDelete => edit_popup::render_delete_popup(frame, app, area),
        Mode::Help => help_overlay::render_help_overlay(frame, app, area),
        _ => {}
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || last_end == 0 {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::model::Status;

    #[test]
    fn highlighted_spans_split_on_matches() {
        let re = Regex::new("(?i)ab").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "xAbyab",
            Style::default(),
            Style::default().add_modifier(Modifier::BOLD),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["x", "Ab", "y", "ab"]);
    }

    #[test]
    fn highlighted_spans_without_match() {
        let re = Regex::new("zz").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "abc", Style::default(), Style::default(), Some(&re));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "abc");
    }

    #[test]
    fn full_frame_shows_error_line() {
        let mut app = app_with(vec![task(1, Status::Todo, "Write spec")]);
        app.last_error = Some("task not found: 9".into());
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(out.contains("Error: task not found: 9"));
        assert!(out.contains("Write spec"));
    }

    #[test]
    fn full_frame_shows_popup_in_edit_mode() {
        let mut app = app_with(Vec::new());
        app.begin_edit(Mode::AddTask, "draft".into(), None);
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(out.contains("New Task"));
        assert!(out.contains("draft"));
    }
}
