mod board;
mod confirm;
mod edit;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use board::handle_board;
use confirm::handle_confirm_delete;
use edit::handle_edit;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+C quits from the board and cancels everywhere else
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        if app.mode == Mode::Board {
            app.should_quit = true;
        } else {
            app.return_to_board();
        }
        return;
    }

    match app.mode {
        Mode::Board => handle_board(app, key),
        Mode::AddTask
        | Mode::EditTask
        | Mode::EditDescription
        | Mode::EditTags
        | Mode::EditDue => handle_edit(app, key),
        Mode::ConfirmDelete => handle_confirm_delete(app, key),
        Mode::Search => handle_search(app, key),
        // Any key closes help
        Mode::Help => app.return_to_board(),
    }
}


#[cfg(test)]
mod tests {
    use super::test_keys::*;
    use super::*;
    use crate::tui::theme::Theme;
    use chrono::{Local, TimeZone};

    fn app() -> App {
        App::new(
            Theme::default(),
            Local.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn ctrl_c_quits_only_from_board() {
        let mut app = app();
        app.mode = Mode::AddTask;
        handle_key(&mut app, ctrl('c'));
        assert_eq!(app.mode, Mode::Board);
        assert!(!app.should_quit);

        handle_key(&mut app, ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn any_key_leaves_help() {
        let mut app = app();
        handle_key(&mut app, ch('?'));
        assert_eq!(app.mode, Mode::Help);
        handle_key(&mut app, ch('x'));
        assert_eq!(app.mode, Mode::Board);
        assert!(!app.should_quit);
    }

    #[test]
    fn bare_modifier_is_ignored() {
        let mut app = app();
        handle_key(
            &mut app,
            key(KeyCode::Modifier(crossterm::event::ModifierKeyCode::LeftShift)),
        );
        assert_eq!(app.mode, Mode::Board);
    }
}
