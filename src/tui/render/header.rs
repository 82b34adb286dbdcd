use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the header: board title (editable), event count, zoom readout
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![Span::styled(
        " [~] ",
        Style::default().fg(app.theme.dim).bg(bg),
    )];
    if app.mode == Mode::Rename {
        spans.push(Span::styled(
            format!("{}\u{258C}", app.rename_input),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            app.board_title.clone(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let count = app.store.len();
    let noun = if count == 1 { "event" } else { "events" };
    spans.push(Span::styled(
        format!("  {} {}", count, noun),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    // Zoom readout, right-aligned
    let zoom = format!("\u{2212} {}% + ", app.controller.zoom.percent());
    let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let zoom_width = zoom.chars().count();
    if left_width + zoom_width < width {
        spans.push(Span::styled(
            " ".repeat(width - left_width - zoom_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            zoom,
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    if area.height > 1 {
        let separator = Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(app.theme.grid).bg(bg),
        ));
        frame.render_widget(
            Paragraph::new(separator),
            Rect::new(area.x, area.y + 1, area.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{render_to_string, test_app};

    #[test]
    fn header_shows_title_count_and_zoom() {
        let mut app = test_app();
        app.seed_demo();
        app.controller.zoom.zoom_in();

        let output = render_to_string(80, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(output.contains("Untitled timeline"));
        assert!(output.contains("5 events"));
        assert!(output.contains("125% +"));
    }

    #[test]
    fn rename_mode_shows_buffer() {
        let mut app = test_app();
        app.mode = Mode::Rename;
        app.rename_input = "Product histor".to_string();

        let output = render_to_string(80, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(output.contains("Product histor\u{258C}"));
    }
}
