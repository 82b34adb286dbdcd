use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::text::prev_grapheme_boundary;

/// Board titles stay short enough for the header row
const MAX_TITLE_LEN: usize = 50;

pub(super) fn handle_rename(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.rename_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let trimmed = app.rename_input.trim();
            if !trimmed.is_empty() {
                app.board_title = trimmed.to_string();
            }
            app.rename_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            if let Some(prev) = prev_grapheme_boundary(&app.rename_input, app.rename_input.len()) {
                app.rename_input.truncate(prev);
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if app.rename_input.chars().count() < MAX_TITLE_LEN {
                app.rename_input.push(c);
            }
        }
        _ => {}
    }
}
