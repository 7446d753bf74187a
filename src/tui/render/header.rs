use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::spans_width;

const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Title on the left; per-lane counts and the clock on the right
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![Span::styled(
        " Laneboard",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    let stats = stats_text(app);
    let used = spans_width(&spans);
    let stats_width = unicode::display_width(&stats);
    if used + stats_width + 1 < width {
        let padding = width - used - stats_width - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(stats, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn stats_text(app: &App) -> String {
    let mut parts: Vec<String> = app
        .lanes
        .iter()
        .map(|lane| format!("{}: {}", lane.label(), lane.len()))
        .collect();
    if app.show_clock {
        parts.push(app.clock.format(CLOCK_FORMAT).to_string());
    }
    parts.join(" | ")
}
