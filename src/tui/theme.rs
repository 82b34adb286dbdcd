use ratatui::style::Color;

use crate::model::config::UiConfig;

/// Parsed color theme for the TUI: near-black canvas, white text in a few
/// opacities, one accent.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub card_border: Color,
    pub card_border_selected: Color,
    pub needs_date: Color,
    pub year: Color,
    pub grid: Color,
    pub connection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x00, 0x00, 0x00),
            text: Color::Rgb(0xE6, 0xE6, 0xE6),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x80, 0x80, 0x80),
            highlight: Color::Rgb(0x60, 0xA5, 0xFA),
            card_border: Color::Rgb(0x4D, 0x4D, 0x4D),
            card_border_selected: Color::Rgb(0xFF, 0xFF, 0xFF),
            needs_date: Color::Rgb(0xFF, 0xD7, 0x00),
            year: Color::Rgb(0xFF, 0xFF, 0xFF),
            grid: Color::Rgb(0x26, 0x26, 0x26),
            connection: Color::Rgb(0x4D, 0x4D, 0x4D),
        }
    }
}

impl Theme {
    /// Theme from config, falling back to defaults per key
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "highlight" => theme.highlight = color,
                    "card_border" => theme.card_border = color,
                    "card_border_selected" => theme.card_border_selected = color,
                    "needs_date" => theme.needs_date = color,
                    "year" => theme.year = color,
                    "grid" => theme.grid = color,
                    "connection" => theme.connection = color,
                    _ => {}
                }
            }
        }
        theme
    }
}

/// Parse a hex color string like "#60A5FA" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
