use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Status, Task, TaskId};
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 30;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Fixed wall clock for render tests: 2024-06-01 12:00:00 local
pub fn test_clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A task created `id` minutes after 2024-01-01, so higher ids sort first.
pub fn task(id: TaskId, status: Status, title: &str) -> Task {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id);
    Task {
        id,
        title: title.to_string(),
        description: String::new(),
        tags: Vec::new(),
        status,
        due: None,
        created_at: at,
        updated_at: at,
    }
}

/// Build a board holding `tasks`, clock pinned to [`test_clock`].
pub fn app_with(tasks: Vec<Task>) -> App {
    let mut app = App::new(Theme::default(), test_clock());
    app.organize(tasks);
    app
}
