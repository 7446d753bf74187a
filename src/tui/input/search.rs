use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::edit::edit_text;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel search; an active filter is cleared too
        KeyCode::Esc => {
            app.set_filter(None);
            app.return_to_board();
        }

        // Commit the typed query as the active filter
        KeyCode::Enter => {
            let query = std::mem::take(&mut app.search_input);
            app.set_filter(Some(&query));
            app.return_to_board();
        }

        _ => {
            edit_text(&mut app.search_input, &mut app.edit_cursor, key);
        }
    }
}
