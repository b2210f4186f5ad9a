//! Gradient-colored text.

use gtui_render::Cell;
use gtui_style::{Color, Style, gradient};

/// One cell per character of `text`, foreground ramped from `start` to
/// `end`.
#[must_use]
pub fn apply_gradient_to_text(text: &str, start: Color, end: Color) -> Vec<Cell> {
    let chars: Vec<char> = text.chars().collect();
    gradient::linear(start, end, chars.len())
        .into_iter()
        .zip(chars)
        .map(|(color, ch)| Cell::new(ch, Style::with_fg(color)))
        .collect()
}
