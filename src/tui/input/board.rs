use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::task_ops::{format_date, join_tags};
use crate::tui::app::{App, EditTarget, Mode};
use crate::tui::command::Command;

pub(super) fn handle_board(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Lanes
        (_, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
            app.select_lane(app.lane_cursor.saturating_sub(1));
        }
        (_, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
            app.select_lane(app.lane_cursor + 1);
        }

        // Tasks
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => app.move_selection(-1),
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => app.move_selection(1),

        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.begin_edit(Mode::AddTask, String::new(), None);
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) | (_, KeyCode::Enter) => {
            edit_selected(app, Mode::EditTask);
        }
        (KeyModifiers::NONE, KeyCode::Char('i')) => edit_selected(app, Mode::EditDescription),
        (KeyModifiers::NONE, KeyCode::Char('t')) => edit_selected(app, Mode::EditTags),
        (KeyModifiers::NONE, KeyCode::Char('u')) => edit_selected(app, Mode::EditDue),

        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => {
            if let Some(task) = app.selected_task() {
                app.pending_delete = Some(task.id);
                app.mode = Mode::ConfirmDelete;
            }
        }

        (KeyModifiers::NONE, KeyCode::Char('m')) => move_selected(app),

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('/')) => {
            app.search_input = app.filter.clone().unwrap_or_default();
            app.edit_cursor = app.search_input.len();
            app.mode = Mode::Search;
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
            app.mode = Mode::Help;
        }

        (_, KeyCode::F(5)) => app.dispatch(Command::Reload),

        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Esc) => {
            if app.filter.is_some() {
                app.set_filter(None);
            } else {
                app.should_quit = true;
            }
        }

        _ => {}
    }
}

/// Enter `mode` for the selected task, seeding the buffer from the field it
/// edits. No-op when nothing is selected.
fn edit_selected(app: &mut App, mode: Mode) {
    let Some(task) = app.selected_task() else {
        return;
    };
    let seed = match mode {
        Mode::EditTask => task.title.clone(),
        Mode::EditDescription => task.description.clone(),
        Mode::EditTags => join_tags(&task.tags),
        Mode::EditDue => task.due.map(format_date).unwrap_or_default(),
        _ => return,
    };
    let target = EditTarget {
        id: task.id,
        status: task.status,
    };
    app.begin_edit(mode, seed, Some(target));
}

/// Send the selected task to the next lane
fn move_selected(app: &mut App) {
    let Some(task) = app.selected_task() else {
        return;
    };
    let (id, status) = (task.id, task.status.next());
    app.move_task(id, status);
}
