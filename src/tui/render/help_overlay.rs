use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::app::App;

const HELP: &[(&str, &str)] = &[
    ("i or /", "compose a new event description"),
    ("Enter", "submit the description"),
    ("click", "select a card"),
    ("drag card", "move it on the canvas"),
    ("drag background", "pan the canvas"),
    ("double-click field", "edit year / title / description"),
    ("a", "add an event next to the selection"),
    ("y", "set the year of the selection"),
    ("d", "delete the selection"),
    ("X", "clear the whole timeline"),
    ("+/- or wheel", "zoom in / out"),
    ("0", "reset zoom"),
    ("r", "rename the board"),
    ("q", "quit"),
];

/// Render the help overlay, centered above everything else
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = 52u16.min(area.width);
    let height = (HELP.len() as u16 + 2).min(area.height);
    let rect = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, rect);

    let block = Block::bordered()
        .title(" keys ")
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<18}", key),
                    Style::default()
                        .fg(app.theme.text_bright)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*what, Style::default().fg(app.theme.text).bg(bg)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        inner,
    );
}
