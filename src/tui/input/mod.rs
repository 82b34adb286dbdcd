mod compose;
mod edit;
mod navigate;
mod pointer;
mod rename;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode. An active inline edit takes the
/// keyboard regardless of mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts everything
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
        ) {
            app.show_help = false;
        }
        return;
    }

    if app.controller.editing().is_some() {
        edit::handle_edit_key(app, key);
        return;
    }

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Compose => compose::handle_compose(app, key),
        Mode::Rename => rename::handle_rename(app, key),
    }
}

/// Handle a mouse event (always pointer-driven, mode-independent)
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    pointer::handle_mouse(app, mouse);
}
