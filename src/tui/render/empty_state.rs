use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Centered invitation shown while the store is empty
pub fn render_empty_state(frame: &mut Frame, app: &App, area: Rect) {
    if area.height < 5 || area.width < 10 {
        return;
    }
    let bg = app.theme.background;
    let lines = vec![
        Line::from(Span::styled(
            "Your timeline is empty",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Drop your first idea and watch it grow",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        Line::default(),
        Line::from(Span::styled(
            "press i, describe an event, press Enter",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];

    let top = area.y + area.height / 2 - 2;
    let rect = Rect::new(area.x, top, area.width, lines.len() as u16);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(bg)),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{render_to_string, test_app};

    #[test]
    fn empty_state_invites_first_event() {
        let app = test_app();
        let output = render_to_string(60, 20, |frame, area| {
            render_empty_state(frame, &app, area);
        });
        assert!(output.contains("Your timeline is empty"));
        assert!(output.contains("Drop your first idea"));
    }
}
