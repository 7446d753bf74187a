use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;
use crate::tui::command::Command;

pub(super) fn handle_confirm_delete(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y' | 'Y') => {
            let pending = app.pending_delete.take();
            app.return_to_board();
            if let Some(id) = pending {
                app.dispatch(Command::Delete { id });
            }
        }
        // Cancel: n or Esc
        KeyCode::Char('n' | 'N') | KeyCode::Esc => app.return_to_board(),
        _ => {}
    }
}
