pub mod canvas_view;
pub mod chat_panel;
pub mod empty_state;
pub mod header;
pub mod help_overlay;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Chat panel width, including its border
const CHAT_WIDTH: u16 = 36;

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | canvas + chat | status row (1 row)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(CHAT_WIDTH)])
        .split(rows[1]);

    // Pointer events from the next tick resolve against these rects
    app.canvas_area = Some(columns[0]);
    app.chat_area = Some(columns[1]);

    if app.store.is_empty() {
        empty_state::render_empty_state(frame, app, columns[0]);
    } else {
        canvas_view::render_canvas(frame, app, columns[0]);
    }
    chat_panel::render_chat_panel(frame, app, columns[1]);
    status_row::render_status_row(frame, app, rows[2]);

    // Help overlay on top of everything
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}
