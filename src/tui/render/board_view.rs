use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use regex::Regex;

use crate::model::{Status, Task};
use crate::ops::task_ops::format_date;
use crate::tui::app::{App, SCROLL_WINDOW};
use crate::util::unicode;

use super::helpers::spans_width;
use super::push_highlighted_spans;

/// Render the three lanes side by side
pub fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let search_re = app.search_regex();
    for (idx, column) in columns.iter().enumerate() {
        render_lane(frame, app, idx, *column, search_re.as_ref());
    }
}

fn render_lane(frame: &mut Frame, app: &App, idx: usize, area: Rect, search_re: Option<&Regex>) {
    let bg = app.theme.background;
    let lane = &app.lanes[idx];
    let visible = app.visible_tasks(idx);
    let is_active = idx == app.lane_cursor;

    let mut border_style = Style::default().fg(app.theme.lane_color(lane.status)).bg(bg);
    if is_active {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ({}) ", lane.label(), visible.len()),
            border_style,
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let total = visible.len();
    // Offsets of lanes not yet revisited may point past a shrunken list
    let offset = match app.scroll_offsets[idx] {
        o if o < total => o,
        _ => 0,
    };

    let mut lines: Vec<Line> = Vec::new();
    if offset > 0 {
        lines.push(Line::from(Span::styled("  \u{25B2} more above", dim)));
    }

    if total == 0 {
        let msg = if app.filter.is_some() {
            " No matching tasks"
        } else {
            " No tasks"
        };
        lines.push(Line::from(Span::styled(
            msg,
            dim.add_modifier(Modifier::ITALIC),
        )));
    }

    let today = app.today();
    for (i, task) in visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(SCROLL_WINDOW)
    {
        let selected = is_active && i == app.task_cursor;
        lines.extend(title_lines(app, task, selected, width, search_re));
        if let Some(meta) = meta_line(app, task, width, today) {
            lines.push(meta);
        }
    }

    if offset + SCROLL_WINDOW < total {
        lines.push(Line::from(Span::styled("  \u{25BC} more below", dim)));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}

/// Title rows for one task, wrapped to the lane width. The marker sits on
/// the first row and continuation rows are indented under it.
fn title_lines<'a>(
    app: &App,
    task: &Task,
    selected: bool,
    width: usize,
    search_re: Option<&Regex>,
) -> Vec<Line<'a>> {
    let bg = app.theme.background;
    let (marker, base) = if selected {
        (
            "\u{25B8} ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(app.theme.text).bg(bg))
    };
    let highlight = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    unicode::wrap_to_width(&task.title, width.saturating_sub(2))
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let lead = if i == 0 { marker } else { "  " };
            let mut spans = vec![Span::styled(lead, base)];
            push_highlighted_spans(&mut spans, &row, base, highlight, search_re);
            if selected {
                let used = spans_width(&spans);
                if used < width {
                    spans.push(Span::styled(" ".repeat(width - used), base));
                }
            }
            Line::from(spans)
        })
        .collect()
}

/// Due date and tags under the title, if the task has either
fn meta_line<'a>(app: &App, task: &Task, width: usize, today: chrono::NaiveDate) -> Option<Line<'a>> {
    if task.due.is_none() && task.tags.is_empty() {
        return None;
    }
    let bg = app.theme.background;
    let mut spans = vec![Span::styled("    ", Style::default().bg(bg))];

    if let Some(due) = task.due {
        let overdue = due < today && task.status != Status::Done;
        let style = if overdue {
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.yellow).bg(bg)
        };
        spans.push(Span::styled(format_date(due), style));
    }

    for tag in &task.tags {
        let label = format!(" {} ", tag);
        let used = spans_width(&spans);
        if used + 1 + unicode::display_width(&label) > width {
            break;
        }
        if spans.len() > 1 {
            spans.push(Span::styled(" ", Style::default().bg(bg)));
        }
        spans.push(Span::styled(
            label,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.tag_color(tag)),
        ));
    }
    Some(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use chrono::NaiveDate;

    fn board(app: &App) -> String {
        render_to_string(TERM_W, 28, |frame, area| render_board(frame, app, area))
    }

    #[test]
    fn lanes_with_counts() {
        let app = app_with(vec![
            task(1, Status::Todo, "Write spec"),
            task(2, Status::InProgress, "Build it"),
        ]);
        let out = board(&app);
        assert!(out.contains("Todo (1)"));
        assert!(out.contains("In Progress (1)"));
        assert!(out.contains("Done (0)"));
        assert!(out.contains("\u{25B8} Write spec"));
        assert!(out.contains("  Build it"));
        assert!(out.contains("No tasks"));
    }

    #[test]
    fn newest_first() {
        let app = app_with(vec![
            task(1, Status::Todo, "older"),
            task(2, Status::Todo, "newer"),
        ]);
        let out = board(&app);
        let newer = out.find("newer").unwrap();
        let older = out.find("older").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn scroll_indicators() {
        let tasks = (1..=15)
            .map(|id| task(id, Status::Todo, &format!("t{:02}", id)))
            .collect();
        let mut app = app_with(tasks);

        let out = board(&app);
        assert!(!out.contains("more above"));
        assert!(out.contains("more below"));
        assert!(out.contains("t15"));
        assert!(!out.contains("t05"));

        for _ in 0..14 {
            app.move_selection(1);
        }
        let out = board(&app);
        assert!(out.contains("more above"));
        assert!(!out.contains("more below"));
        assert!(out.contains("\u{25B8} t01"));
        assert!(!out.contains("t11"));
    }

    #[test]
    fn long_title_wraps_within_lane() {
        let title = "Draft the quarterly planning document for the platform team";
        let app = app_with(vec![task(1, Status::Todo, title)]);
        let lines = title_lines(&app, &app.lanes[0].tasks[0], false, 20, None);
        assert!(lines.len() > 1);

        let rows: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(rows[0].starts_with("  Draft the"));
        for row in &rows {
            assert!(unicode::display_width(row) <= 20);
        }
        let text: String = rows
            .iter()
            .map(|r| r.chars().skip(2).collect::<String>())
            .collect();
        assert_eq!(text, title);

        let out = board(&app);
        assert!(out.contains("quarterly"));
        assert!(out.contains("platform"));
        assert!(!out.contains("\u{2026}"));
    }

    #[test]
    fn due_and_tags_shown() {
        let mut t = task(1, Status::Todo, "Ship");
        t.due = NaiveDate::from_ymd_opt(2024, 5, 30);
        t.tags = vec!["bug".into(), "urgent".into()];
        let app = app_with(vec![t]);
        let out = board(&app);
        assert!(out.contains("2024-05-30  bug   urgent"));
    }

    #[test]
    fn overdue_is_red_unless_done() {
        let mut late = task(1, Status::Todo, "late");
        late.due = NaiveDate::from_ymd_opt(2024, 5, 30);
        let mut done = task(2, Status::Done, "done");
        done.due = NaiveDate::from_ymd_opt(2024, 5, 30);
        let app = app_with(vec![late.clone(), done.clone()]);
        let today = app.today();

        let line = meta_line(&app, &late, 30, today).unwrap();
        assert_eq!(line.spans[1].style.fg, Some(app.theme.red));
        let line = meta_line(&app, &done, 30, today).unwrap();
        assert_eq!(line.spans[1].style.fg, Some(app.theme.yellow));
    }

    #[test]
    fn filter_hides_and_counts() {
        let mut app = app_with(vec![
            task(1, Status::Todo, "alpha"),
            task(2, Status::Todo, "beta"),
        ]);
        app.set_filter(Some("title:alp"));
        let out = board(&app);
        assert!(out.contains("Todo (1)"));
        assert!(out.contains("alpha"));
        assert!(!out.contains("beta"));
        assert!(out.contains("No matching tasks"));
    }

    #[test]
    fn title_match_is_highlighted() {
        let mut app = app_with(vec![task(1, Status::Todo, "Fix Login bug")]);
        app.set_filter(Some("login"));
        let re = app.search_regex();
        let lines = title_lines(&app, &app.lanes[0].tasks[0], false, 30, re.as_ref());
        let hit = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "Login")
            .unwrap();
        assert_eq!(hit.style.bg, Some(app.theme.search_match_bg));
    }
}
