use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::task_ops::{parse_due, parse_tags, validate_title};
use crate::tui::app::{App, Mode};
use crate::tui::command::Command;
use crate::util::unicode;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let multiline = app.mode == Mode::EditDescription;
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.return_to_board(),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) if multiline => confirm_edit(app),
        (_, KeyCode::Enter) if multiline => {
            insert_text(&mut app.edit_buffer, &mut app.edit_cursor, "\n");
        }
        (_, KeyCode::Enter) => confirm_edit(app),
        _ => {
            edit_text(&mut app.edit_buffer, &mut app.edit_cursor, key);
        }
    }
}

/// Apply the buffer for the current edit mode. Invalid input (blank title,
/// unparsable date) leaves the mode and buffer as they are.
fn confirm_edit(app: &mut App) {
    let target = app.edit_target;
    let command = match app.mode {
        Mode::AddTask => match validate_title(&app.edit_buffer) {
            Ok(title) => Command::Create {
                title,
                status: app.active_status(),
            },
            Err(_) => return,
        },
        Mode::EditTask => {
            let (Some(target), Ok(title)) = (target, validate_title(&app.edit_buffer)) else {
                return;
            };
            Command::UpdateTitle {
                id: target.id,
                title,
                status: target.status,
            }
        }
        Mode::EditDescription => {
            let Some(target) = target else { return };
            Command::UpdateDescription {
                id: target.id,
                text: app.edit_buffer.clone(),
            }
        }
        Mode::EditTags => {
            let Some(target) = target else { return };
            Command::UpdateTags {
                id: target.id,
                tags: parse_tags(&app.edit_buffer),
            }
        }
        Mode::EditDue => {
            let (Some(target), Ok(due)) = (target, parse_due(&app.edit_buffer)) else {
                return;
            };
            Command::UpdateDue { id: target.id, due }
        }
        _ => return,
    };
    app.return_to_board();
    app.dispatch(command);
}

/// Single-buffer text editing shared by the edit popups and the search
/// prompt. `cursor` is a byte offset kept on a grapheme boundary. Returns
/// false for keys it does not handle.
pub(super) fn edit_text(buffer: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    *cursor = (*cursor).min(buffer.len());
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            let mut tmp = [0u8; 4];
            insert_text(buffer, cursor, c.encode_utf8(&mut tmp));
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(*cursor..next, "");
            }
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        (_, KeyCode::Home) => *cursor = 0,
        (_, KeyCode::End) => *cursor = buffer.len(),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            buffer.clear();
            *cursor = 0;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
            let start = unicode::word_boundary_left(buffer, *cursor);
            buffer.replace_range(start..*cursor, "");
            *cursor = start;
        }
        _ => return false,
    }
    true
}

fn insert_text(buffer: &mut String, cursor: &mut usize, text: &str) {
    buffer.insert_str(*cursor, text);
    *cursor += text.len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, Task};
    use crate::tui::app::EditTarget;
    use crate::tui::input::test_keys::*;
    use crate::tui::theme::Theme;
    use chrono::{Local, NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn app_with_task() -> App {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut app = App::new(
            Theme::default(),
            Local.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        );
        app.organize(vec![Task {
            id: 3,
            title: "old".into(),
            description: String::new(),
            tags: Vec::new(),
            status: Status::InProgress,
            due: None,
            created_at: at,
            updated_at: at,
        }]);
        app.lane_cursor = 1;
        app
    }

    fn target() -> Option<EditTarget> {
        Some(EditTarget {
            id: 3,
            status: Status::InProgress,
        })
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_edit(app, ch(c));
        }
    }

    #[test]
    fn add_task_creates_in_active_lane() {
        let mut app = app_with_task();
        app.begin_edit(Mode::AddTask, String::new(), None);
        type_str(&mut app, "  Write spec ");
        handle_edit(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Board);
        assert_eq!(
            app.take_commands(),
            vec![Command::Create {
                title: "Write spec".into(),
                status: Status::InProgress
            }]
        );
    }

    #[test]
    fn blank_title_is_rejected_locally() {
        let mut app = app_with_task();
        app.begin_edit(Mode::AddTask, String::new(), None);
        type_str(&mut app, "   ");
        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::AddTask);
        assert!(app.take_commands().is_empty());

        app.begin_edit(Mode::EditTask, String::new(), target());
        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::EditTask);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn edit_title_keeps_status() {
        let mut app = app_with_task();
        app.begin_edit(Mode::EditTask, "old".into(), target());
        handle_edit(&mut app, ctrl('u'));
        type_str(&mut app, "new");
        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(
            app.take_commands(),
            vec![Command::UpdateTitle {
                id: 3,
                title: "new".into(),
                status: Status::InProgress
            }]
        );
    }

    #[test]
    fn description_is_multiline_and_may_be_empty() {
        let mut app = app_with_task();
        app.begin_edit(Mode::EditDescription, String::new(), target());
        type_str(&mut app, "a");
        handle_edit(&mut app, key(KeyCode::Enter));
        type_str(&mut app, "b");
        assert_eq!(app.mode, Mode::EditDescription);
        handle_edit(&mut app, ctrl('s'));
        assert_eq!(
            app.take_commands(),
            vec![Command::UpdateDescription {
                id: 3,
                text: "a\nb".into()
            }]
        );

        app.begin_edit(Mode::EditDescription, "x".into(), target());
        handle_edit(&mut app, key(KeyCode::Backspace));
        handle_edit(&mut app, ctrl('s'));
        assert_eq!(
            app.take_commands(),
            vec![Command::UpdateDescription {
                id: 3,
                text: String::new()
            }]
        );
    }

    #[test]
    fn tags_are_normalized_and_empty_clears() {
        let mut app = app_with_task();
        app.begin_edit(Mode::EditTags, String::new(), target());
        type_str(&mut app, "Bug,  bug , URGENT,,");
        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(
            app.take_commands(),
            vec![Command::UpdateTags {
                id: 3,
                tags: vec!["bug".into(), "urgent".into()]
            }]
        );

        app.begin_edit(Mode::EditTags, String::new(), target());
        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(
            app.take_commands(),
            vec![Command::UpdateTags {
                id: 3,
                tags: Vec::new()
            }]
        );
    }

    #[test]
    fn due_date_parse_or_ignore() {
        let mut app = app_with_task();
        app.begin_edit(Mode::EditDue, String::new(), target());
        type_str(&mut app, "2024-13-01");
        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::EditDue);
        assert_eq!(app.last_error, None);
        assert!(app.take_commands().is_empty());

        handle_edit(&mut app, ctrl('u'));
        type_str(&mut app, "2024-12-01");
        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Board);
        assert_eq!(
            app.take_commands(),
            vec![Command::UpdateDue {
                id: 3,
                due: NaiveDate::from_ymd_opt(2024, 12, 1)
            }]
        );

        app.begin_edit(Mode::EditDue, String::new(), target());
        handle_edit(&mut app, key(KeyCode::Enter));
        assert_eq!(
            app.take_commands(),
            vec![Command::UpdateDue { id: 3, due: None }]
        );
    }

    #[test]
    fn esc_discards_buffer() {
        let mut app = app_with_task();
        app.begin_edit(Mode::EditTask, "old".into(), target());
        type_str(&mut app, "er");
        handle_edit(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Board);
        assert_eq!(app.edit_buffer, "");
        assert_eq!(app.edit_target, None);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn q_is_typed_not_quit() {
        let mut app = app_with_task();
        app.begin_edit(Mode::AddTask, String::new(), None);
        handle_edit(&mut app, ch('q'));
        assert_eq!(app.edit_buffer, "q");
        assert!(!app.should_quit);
    }

    #[test]
    fn cursor_editing() {
        let mut buf = String::from("héllo");
        let mut cur = buf.len();

        edit_text(&mut buf, &mut cur, key(KeyCode::Left));
        edit_text(&mut buf, &mut cur, key(KeyCode::Backspace));
        assert_eq!(buf, "hélo");

        edit_text(&mut buf, &mut cur, key(KeyCode::Home));
        edit_text(&mut buf, &mut cur, key(KeyCode::Right));
        edit_text(&mut buf, &mut cur, key(KeyCode::Delete));
        assert_eq!(buf, "hlo");

        edit_text(&mut buf, &mut cur, ch('X'));
        assert_eq!(buf, "hXlo");
        assert_eq!(cur, 2);

        edit_text(&mut buf, &mut cur, key(KeyCode::End));
        edit_text(&mut buf, &mut cur, ch(' '));
        edit_text(&mut buf, &mut cur, ch('w'));
        edit_text(&mut buf, &mut cur, ctrl('w'));
        assert_eq!(buf, "hXlo ");

        assert!(!edit_text(&mut buf, &mut cur, key(KeyCode::F(1))));
    }
}
