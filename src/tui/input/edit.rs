use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Keys while an inline field edit is active. Enter commits single-line
/// fields; in the multi-line description it inserts a line break, and
/// Ctrl+S (or clicking away) commits instead.
pub(super) fn handle_edit_key(app: &mut App, key: KeyEvent) {
    let Some((_, field)) = app.controller.editing() else {
        return;
    };

    match key.code {
        KeyCode::Esc => app.controller.cancel_edit(),
        KeyCode::Enter if field.is_multiline() => app.controller.edit_insert('\n'),
        KeyCode::Enter => commit(app),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => commit(app),
        KeyCode::Backspace => app.controller.edit_backspace(),
        KeyCode::Left => app.controller.edit_left(),
        KeyCode::Right => app.controller.edit_right(),
        KeyCode::Home => app.controller.edit_home(),
        KeyCode::End => app.controller.edit_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.controller.edit_insert(c);
        }
        _ => {}
    }
}

/// A rejected year keeps the edit surface open for correction
fn commit(app: &mut App) {
    if let Err(err) = app.controller.commit_edit(&mut app.store) {
        app.set_notice(err.to_string());
    }
}
