use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::{App, Mode};

const POPUP_WIDTH: u16 = 64;

fn popup_title(mode: Mode) -> &'static str {
    match mode {
        Mode::AddTask => " New Task ",
        Mode::EditTask => " Edit Title ",
        Mode::EditDescription => " Edit Description ",
        Mode::EditTags => " Edit Tags ",
        Mode::EditDue => " Edit Due Date ",
        _ => "",
    }
}

fn popup_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::EditDescription => "Enter newline  Ctrl+S save  Esc cancel",
        Mode::EditTags => "comma separated  Enter save  Esc cancel",
        Mode::EditDue => "YYYY-MM-DD, empty clears  Enter save  Esc cancel",
        _ => "Enter save  Esc cancel",
    }
}

/// Text input popup for the task edit modes
pub fn render_edit_popup(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let text = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor = Style::default().fg(app.theme.highlight).bg(bg);

    let (before, after) = app
        .edit_buffer
        .split_at(app.edit_cursor.min(app.edit_buffer.len()));

    // The cursor glyph sits between the two halves, which may span lines
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    for (i, part) in before.split('\n').enumerate() {
        if i > 0 {
            lines.push(Line::from(std::mem::take(&mut current)));
        }
        current.push(Span::styled(part.to_string(), text));
    }
    current.push(Span::styled("\u{258C}", cursor));
    for (i, part) in after.split('\n').enumerate() {
        if i > 0 {
            lines.push(Line::from(std::mem::take(&mut current)));
        }
        current.push(Span::styled(part.to_string(), text));
    }
    lines.push(Line::from(current));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        popup_hint(app.mode),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let height = (lines.len() as u16 + 2).clamp(5, area.height.max(5));
    let popup = super::helpers::centered_rect_fixed(POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            popup_title(app.mode),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup);
}

/// y/n prompt for the pending delete
pub fn render_delete_popup(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = app
        .pending_delete
        .and_then(|id| app.find_task(id))
        .map(|t| t.title.as_str())
        .unwrap_or("this task");

    let popup = super::helpers::centered_rect_fixed(POPUP_WIDTH, 5, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(vec![
            Span::styled("Delete ", Style::default().fg(app.theme.text).bg(bg)),
            Span::styled(
                format!("\"{}\"", title),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(app.theme.text).bg(bg)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "y delete  n cancel",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .title(Span::styled(
            " Confirm Delete ",
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        popup,
    );
}
