//! Explicit theme values.
//!
//! A [`Theme`] is a plain value handed to widget constructors. There is no
//! process-wide theme; two UIs in one process can use different themes.

use crate::color::Color;
use crate::style::Style;

/// Styles for bordered containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTheme {
    pub title: Style,
    pub border: Style,
}

/// Styles for text widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphTheme {
    pub text: Style,
}

/// Root theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Style for glyphs no widget styles explicitly.
    pub default: Style,
    pub block: BlockTheme,
    pub paragraph: ParagraphTheme,
    /// Cycle of series colors for multi-series consumers.
    pub standard_colors: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let white = Style::with_fg(Color::WHITE);
        Self {
            default: white,
            block: BlockTheme {
                title: white,
                border: white,
            },
            paragraph: ParagraphTheme { text: white },
            standard_colors: vec![
                Color::RED,
                Color::GREEN,
                Color::YELLOW,
                Color::BLUE,
                Color::MAGENTA,
                Color::CYAN,
                Color::WHITE,
            ],
        }
    }
}

impl Theme {
    /// Series color for index `i`, wrapping around the cycle.
    #[must_use]
    pub fn series_color(&self, i: usize) -> Color {
        if self.standard_colors.is_empty() {
            return self.default.fg;
        }
        self.standard_colors[i % self.standard_colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_color_wraps() {
        let theme = Theme::default();
        assert_eq!(theme.series_color(0), Color::RED);
        assert_eq!(theme.series_color(7), Color::RED);
    }

    #[test]
    fn empty_cycle_falls_back_to_default_fg() {
        let theme = Theme {
            standard_colors: Vec::new(),
            ..Theme::default()
        };
        assert_eq!(theme.series_color(3), Color::WHITE);
    }

    #[test]
    fn themes_are_independent_values() {
        let mut a = Theme::default();
        let b = Theme::default();
        a.block.border = Style::with_fg(Color::GREEN);
        assert_ne!(a.block.border, b.block.border);
    }
}
