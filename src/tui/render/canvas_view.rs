use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::canvas::EventField;
use crate::canvas::controller::{CARD_HEIGHT, CARD_WIDTH};
use crate::model::event::{Position, TimelineEvent};
use crate::tui::app::App;
use crate::util::text::{truncate_to_width, wrap_words};

/// Render the canvas: dot grid, chronological connections, then the cards
/// in exposed order so later cards draw on top.
pub fn render_canvas(frame: &mut Frame, app: &App, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    if app.config.canvas.show_grid {
        draw_grid(frame.buffer_mut(), area, app.theme.grid);
    }
    draw_connections(frame.buffer_mut(), app, area);

    let zoom = app.controller.zoom.level();
    for event in app.store.iter() {
        let Some(position) = event.position else {
            continue;
        };
        let origin = app.controller.transform.canvas_to_screen(position, zoom);
        if let Some(rect) = card_screen_rect(area, origin, zoom) {
            draw_card(frame, app, event, rect);
        }
    }
}

/// Fixed screen-space dot grid backdrop; the view pans and zooms over it
fn draw_grid(buf: &mut Buffer, area: Rect, color: Color) {
    let style = Style::default().fg(color);
    for y in (area.y..area.y + area.height).step_by(3) {
        for x in (area.x..area.x + area.width).step_by(6) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol("\u{00B7}");
                cell.set_style(style);
            }
        }
    }
}

/// Dotted lines between chronological neighbors (dated events only)
fn draw_connections(buf: &mut Buffer, app: &App, area: Rect) {
    let zoom = app.controller.zoom.level();
    let style = Style::default().fg(app.theme.connection);
    let anchors: Vec<Position> = app
        .store
        .dated()
        .filter_map(|e| e.position)
        .map(|p| {
            app.controller.transform.canvas_to_screen(
                Position::new(p.x + CARD_WIDTH / 2.0, p.y + CARD_HEIGHT / 2.0),
                zoom,
            )
        })
        .collect();
    for pair in anchors.windows(2) {
        draw_dotted_line(buf, area, pair[0], pair[1], style);
    }
}

fn draw_dotted_line(buf: &mut Buffer, area: Rect, from: Position, to: Position, style: Style) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs()).ceil() as i32;
    if steps == 0 {
        return;
    }
    for i in (0..=steps).step_by(2) {
        let t = i as f64 / steps as f64;
        let x = area.x as i64 + (from.x + dx * t).round() as i64;
        let y = area.y as i64 + (from.y + dy * t).round() as i64;
        if x < area.x as i64
            || x >= (area.x + area.width) as i64
            || y < area.y as i64
            || y >= (area.y + area.height) as i64
        {
            continue;
        }
        if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
            cell.set_symbol("\u{00B7}");
            cell.set_style(style);
        }
    }
}

/// Card rect in screen cells, scaled by zoom and clipped to the canvas.
/// None when the card is fully off-screen.
fn card_screen_rect(area: Rect, origin: Position, zoom: f64) -> Option<Rect> {
    let w = (CARD_WIDTH * zoom).round() as i64;
    let h = (CARD_HEIGHT * zoom).round() as i64;
    let x = area.x as i64 + origin.x.round() as i64;
    let y = area.y as i64 + origin.y.round() as i64;

    let x1 = x.max(area.x as i64);
    let y1 = y.max(area.y as i64);
    let x2 = (x + w).min((area.x + area.width) as i64);
    let y2 = (y + h).min((area.y + area.height) as i64);
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some(Rect::new(
        x1 as u16,
        y1 as u16,
        (x2 - x1) as u16,
        (y2 - y1) as u16,
    ))
}

fn draw_card(frame: &mut Frame, app: &App, event: &TimelineEvent, rect: Rect) {
    let bg = app.theme.background;
    let selected = app.controller.selected == Some(event.id);
    let border_style = if selected {
        Style::default()
            .fg(app.theme.card_border_selected)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.card_border).bg(bg)
    };

    let block = Block::bordered()
        .border_style(border_style)
        .style(Style::default().bg(bg));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let editing = app
        .controller
        .editing()
        .filter(|(id, _)| *id == event.id)
        .map(|(_, field)| field);
    let width = inner.width as usize;

    // Year row: the edit buffer, the confirmed year, or the needs-date mark
    let year_line = if editing == Some(EventField::Year) {
        Line::from(Span::styled(
            edit_display(app),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
    } else if event.date_confirmed && !event.year.is_empty() {
        Line::from(Span::styled(
            truncate_to_width(&event.year, width),
            Style::default()
                .fg(app.theme.year)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            truncate_to_width("\u{25CC} needs date", width),
            Style::default().fg(app.theme.needs_date).bg(bg),
        ))
    };

    let title_text = if editing == Some(EventField::Title) {
        edit_display(app)
    } else {
        event.title.clone()
    };
    let title_line = Line::from(Span::styled(
        truncate_to_width(&title_text, width),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));

    let mut lines: Vec<Line> = if inner.height == 1 {
        vec![title_line]
    } else {
        vec![year_line, title_line]
    };
    if inner.height > 2 {
        let description = if editing == Some(EventField::Description) {
            edit_display(app)
        } else {
            event.description.clone()
        };
        let body_style = Style::default().fg(app.theme.dim).bg(bg);
        for row in wrap_words(&description, width)
            .into_iter()
            .take(inner.height as usize - 2)
        {
            lines.push(Line::from(Span::styled(row, body_style)));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        inner,
    );
}

/// The active edit buffer with a cursor mark at the caret
fn edit_display(app: &App) -> String {
    match app.controller.edit_buffer() {
        Some((buffer, cursor)) => {
            let mut out = String::with_capacity(buffer.len() + 3);
            out.push_str(&buffer[..cursor]);
            out.push('\u{258C}');
            out.push_str(&buffer[cursor..]);
            out
        }
        None => String::new(),
    }
}
