use crossterm::event::{KeyCode, KeyEvent};

use crate::canvas::EventField;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('i') | KeyCode::Char('/') => app.mode = Mode::Compose,
        KeyCode::Char('r') => {
            app.rename_input = app.board_title.clone();
            app.mode = Mode::Rename;
        }

        // View controls
        KeyCode::Char('+') | KeyCode::Char('=') => app.controller.zoom.zoom_in(),
        KeyCode::Char('-') => app.controller.zoom.zoom_out(),
        KeyCode::Char('0') => app.controller.zoom.reset(),

        // Selection ops
        KeyCode::Char('a') => {
            if app.controller.add_adjacent(&mut app.store).is_none() {
                app.set_notice("select one event first");
            }
        }
        KeyCode::Char('y') => match app.controller.selected {
            Some(id) => app.controller.begin_edit(&app.store, id, EventField::Year),
            None => app.set_notice("select an event to set its year"),
        },
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.controller.delete_selected(&mut app.store) {
                tracing::debug!(%id, "event deleted");
            }
        }
        KeyCode::Char('X') => {
            app.store.clear();
            app.messages.clear();
            app.controller.selected = None;
            app.set_notice("timeline cleared");
        }

        KeyCode::Esc => app.controller.selected = None,
        _ => {}
    }
}
