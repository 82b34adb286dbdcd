use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::text::{next_grapheme_boundary, prev_grapheme_boundary};

pub(super) fn handle_compose(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => app.submit_description(),
        KeyCode::Backspace => {
            if let Some(prev) = prev_grapheme_boundary(&app.compose_input, app.compose_cursor) {
                app.compose_input.replace_range(prev..app.compose_cursor, "");
                app.compose_cursor = prev;
            }
        }
        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(&app.compose_input, app.compose_cursor) {
                app.compose_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(&app.compose_input, app.compose_cursor) {
                app.compose_cursor = next;
            }
        }
        KeyCode::Home => app.compose_cursor = 0,
        KeyCode::End => app.compose_cursor = app.compose_input.len(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.compose_input.insert(app.compose_cursor, c);
            app.compose_cursor += c.len_utf8();
        }
        _ => {}
    }
}
