use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(70, 90, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Board", header_style)));
    for (key, desc) in [
        (" \u{2190}\u{2192}/hl", "Switch lane"),
        (" \u{2191}\u{2193}/kj", "Move cursor"),
        (" a", "Add task to this lane"),
        (" e/Enter", "Edit title"),
        (" i", "Edit description"),
        (" t", "Edit tags"),
        (" u", "Set due date"),
        (" d/Del", "Delete task"),
        (" m", "Move to next lane"),
        (" F5", "Reload"),
        (" q/Esc", "Quit (Esc clears a filter first)"),
    ] {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Search", header_style)));
    for (key, desc) in [
        (" /", "Open search, Enter applies"),
        (" keyword", "Title, description or tag"),
        (" title:text", "Title only"),
        (" desc:text", "Description only"),
        (" tag:name", "Exact tag"),
        (" due:none", "No due date"),
        (" due:overdue", "Due before today"),
        (" due:today", "Also yesterday, tomorrow"),
        (" due:<=DATE", "Also <, >, >= and exact YYYY-MM-DD"),
    ] {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Editing", header_style)));
    add_binding(&mut lines, " Esc/Ctrl+C", "Cancel", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+S", "Save description", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+U", "Clear input", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(" Key Bindings ", header_style))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
