//! Styling utilities and color schemes

use ratatui::style::Color;

/// Get the color for an HTTP method
pub fn get_method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Blue,
        "PUT" => Color::Yellow,
        "DELETE" => Color::Red,
        "PATCH" => Color::Cyan,
        _ => Color::White,
    }
}

pub fn focused_border() -> Color {
    Color::Cyan
}

pub fn unfocused_border() -> Color {
    Color::DarkGray
}

pub fn default_fg() -> Color {
    Color::Gray
}

/// Method column width for consistent formatting
#[allow(dead_code)]
pub const METHOD_COLUMN_WIDTH: usize = 7;
