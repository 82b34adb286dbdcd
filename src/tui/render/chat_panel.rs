use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::text::{display_width, wrap_words};

/// Render the chat panel: scrollback of submitted descriptions with their
/// event status, and the compose input at the bottom.
pub fn render_chat_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let block = Block::bordered()
        .title(" add to timeline ")
        .border_style(Style::default().fg(app.theme.card_border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 || inner.width == 0 {
        return;
    }

    let width = inner.width as usize;
    let message_rows = inner.height - 2;

    // Scrollback, newest at the bottom
    let mut lines: Vec<Line> = Vec::new();
    for message in &app.messages {
        for row in wrap_words(&message.text, width) {
            lines.push(Line::from(Span::styled(
                row,
                Style::default().fg(app.theme.text).bg(bg),
            )));
        }
        match app.store.get(message.event_id) {
            Some(event) if event.needs_date() => {
                lines.push(Line::from(Span::styled(
                    "  \u{25CC} needs a date \u{2014} y to set",
                    Style::default().fg(app.theme.needs_date).bg(bg),
                )));
            }
            Some(event) if !event.year.is_empty() => {
                lines.push(Line::from(Span::styled(
                    format!("  {}", event.year),
                    Style::default().fg(app.theme.dim).bg(bg),
                )));
            }
            // Deleted events keep their chat line, without status
            _ => {}
        }
        lines.push(Line::default());
    }

    let visible = message_rows as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    let scroll = app.chat_scroll.min(max_scroll);
    let end = lines.len() - scroll;
    let start = end.saturating_sub(visible);
    frame.render_widget(
        Paragraph::new(lines[start..end].to_vec()).style(Style::default().bg(bg)),
        Rect::new(inner.x, inner.y, inner.width, message_rows),
    );

    // Separator above the input line
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(app.theme.grid).bg(bg),
        ))),
        Rect::new(inner.x, inner.y + message_rows, inner.width, 1),
    );

    let input_line = if app.mode == Mode::Compose {
        let shown = tail_fit(&app.compose_input, width.saturating_sub(4));
        Line::from(vec![
            Span::styled("> ", Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(
                shown,
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled(
                "\u{258C}",
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(
            "describe an event\u{2026} (i)",
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    };
    frame.render_widget(
        Paragraph::new(input_line),
        Rect::new(inner.x, inner.y + message_rows + 1, inner.width, 1),
    );
}

/// Keep the tail of a string that fits in `width` cells (the caret end is
/// what matters while typing)
fn tail_fit(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars().rev() {
        let w = display_width(&c.to_string());
        if used + w > width {
            break;
        }
        used += w;
        out.insert(0, c);
    }
    out
}
