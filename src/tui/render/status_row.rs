use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen): key hints for the current
/// mode on the left, a transient notice on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let hints = if let Some((_, field)) = app.controller.editing() {
        if field.is_multiline() {
            " Enter newline  Ctrl+S commit  Esc cancel"
        } else {
            " Enter commit  Esc cancel"
        }
    } else {
        match app.mode {
            Mode::Navigate => {
                " i compose  a adjacent  y year  d delete  +/- zoom  0 reset  ? help  q quit"
            }
            Mode::Compose => " Enter add  Esc back",
            Mode::Rename => " Enter save  Esc cancel",
        }
    };

    let mut spans = Vec::new();
    if app.config.ui.show_key_hints {
        spans.push(Span::styled(
            hints,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    if let Some(notice) = app.notice() {
        let notice = format!("{} ", notice);
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let notice_width = notice.chars().count();
        if used + notice_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - notice_width),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(
                notice,
                Style::default().fg(app.theme.needs_date).bg(bg),
            ));
        }
    }

    if spans.is_empty() {
        spans.push(Span::styled(" ".repeat(width), Style::default().bg(bg)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{render_to_string, test_app};

    #[test]
    fn navigate_hints_show() {
        let app = test_app();
        let output = render_to_string(80, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.contains("i compose"));
        assert!(output.contains("q quit"));
    }

    #[test]
    fn notice_is_right_aligned() {
        let mut app = test_app();
        app.set_notice("not a 4-digit year");
        let output = render_to_string(80, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.trim_end().ends_with("not a 4-digit year"));
    }
}
