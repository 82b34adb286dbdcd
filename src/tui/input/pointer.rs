use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::model::event::Position;
use crate::tui::app::{App, Mode};

/// Two downs on the same cell within this window make a double-click
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Translate terminal mouse events into the controller's pointer protocol.
/// The canvas rect from the last render is the tracked surface; crossing
/// its edge mid-gesture counts as pointer-leave.
pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let Some(canvas) = app.canvas_area else {
        return;
    };
    let inside = contains(canvas, mouse.column, mouse.row);
    let screen = local_position(canvas, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if inside {
                let now = Instant::now();
                let is_double = app.last_click.take().is_some_and(|(at, col, row)| {
                    now.duration_since(at) < DOUBLE_CLICK_WINDOW
                        && col == mouse.column
                        && row == mouse.row
                });
                if is_double {
                    app.controller.double_click(&app.store, screen);
                } else {
                    app.controller.pointer_down(&mut app.store, screen);
                    app.last_click = Some((now, mouse.column, mouse.row));
                }
            } else {
                // Clicking outside the canvas blurs an active edit; a
                // rejected year keeps it open
                if app.controller.editing().is_some()
                    && let Err(err) = app.controller.commit_edit(&mut app.store)
                {
                    app.set_notice(err.to_string());
                    return;
                }
                if app
                    .chat_area
                    .is_some_and(|r| contains(r, mouse.column, mouse.row))
                {
                    app.mode = Mode::Compose;
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            if inside {
                app.controller.pointer_move(&mut app.store, screen);
            } else {
                app.controller.pointer_leave();
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if inside {
                app.controller.pointer_up(screen);
            } else {
                app.controller.pointer_leave();
            }
        }
        MouseEventKind::ScrollUp => {
            if inside {
                app.controller.zoom.zoom_in();
            } else {
                app.chat_scroll = app.chat_scroll.saturating_add(1);
            }
        }
        MouseEventKind::ScrollDown => {
            if inside {
                app.controller.zoom.zoom_out();
            } else {
                app.chat_scroll = app.chat_scroll.saturating_sub(1);
            }
        }
        _ => {}
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

/// Screen position local to the canvas rect, in cells
fn local_position(rect: Rect, column: u16, row: u16) -> Position {
    Position::new(
        column.saturating_sub(rect.x) as f64,
        row.saturating_sub(rect.y) as f64,
    )
}
