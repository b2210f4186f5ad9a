//! Inline style markup.
//!
//! # Syntax
//!
//! `[span text](fg:NAME,bg:#RRGGBB,mod:bold)` styles `span text`; everything
//! outside a span uses the caller's default style.
//!
//! - `fg` and `bg` take a color name, a terminal driver name such as
//!   `dark_red`, or a hex value (`#` optional). Unknown colors leave that
//!   field at the default.
//! - `mod` takes a modifier name (`bold`, `underline`, `reverse`, `dim`,
//!   `blink`, `italic`, `strike`). Modifiers add to the default's set;
//!   unknown names are ignored.
//! - Balanced brackets inside a span are part of its text: `[a[b]c](...)`
//!   styles `a[b]c`.
//!
//! Malformed input never errors. A span that is not closed, a `]` not
//! followed by `(`, or a directive that never closes is emitted as literal
//! text in the default style, character for character.
//!
//! # Example
//! ```
//! use gtui_style::{Color, Style};
//! use gtui_text::markup::parse_styles;
//!
//! let cells = parse_styles("ok [hi](fg:red)", Style::CLEAR);
//! assert_eq!(cells.len(), 5);
//! assert_eq!(cells[3].style.fg, Color::RED);
//! ```

use gtui_render::Cell;
use gtui_style::{Color, Style, StyleFlags};

const BEGIN_SPAN: char = '[';
const END_SPAN: char = ']';
const BEGIN_DIRECTIVE: char = '(';
const END_DIRECTIVE: char = ')';
const ITEM_SEPARATOR: char = ',';
const VALUE_SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    /// Inside `[...`; `depth` counts unclosed brackets. Zero means the span
    /// just closed and only `(` may follow.
    Span { depth: usize },
    Directive,
}

struct Parser {
    default: Style,
    state: State,
    cells: Vec<Cell>,
    /// Span text including its brackets.
    span: String,
    /// Directive text including its parentheses.
    directive: String,
}

impl Parser {
    fn new(default: Style, capacity: usize) -> Self {
        Self {
            default,
            state: State::Plain,
            cells: Vec::with_capacity(capacity),
            span: String::new(),
            directive: String::new(),
        }
    }

    fn push_plain(&mut self, ch: char) {
        self.cells.push(Cell::new(ch, self.default));
    }

    fn reset(&mut self) {
        self.span.clear();
        self.directive.clear();
        self.state = State::Plain;
    }

    /// Emit everything buffered as literal text.
    fn rollback(&mut self) {
        let default = self.default;
        self.cells.extend(
            self.span
                .chars()
                .chain(self.directive.chars())
                .map(|ch| Cell::new(ch, default)),
        );
        self.reset();
    }

    fn step(&mut self, ch: char) {
        match self.state {
            State::Plain => {
                if ch == BEGIN_SPAN {
                    self.span.push(ch);
                    self.state = State::Span { depth: 1 };
                } else {
                    self.push_plain(ch);
                }
            }
            State::Span { depth: 0 } => {
                if ch == BEGIN_DIRECTIVE {
                    self.directive.push(ch);
                    self.state = State::Directive;
                } else {
                    self.rollback();
                    self.step(ch);
                }
            }
            State::Span { depth } => {
                self.span.push(ch);
                let depth = match ch {
                    BEGIN_SPAN => depth + 1,
                    END_SPAN => depth - 1,
                    _ => depth,
                };
                self.state = State::Span { depth };
            }
            State::Directive => {
                self.directive.push(ch);
                if ch == END_DIRECTIVE {
                    self.finish_span();
                }
            }
        }
    }

    fn finish_span(&mut self) {
        let style = read_style(strip_ends(&self.directive), self.default);
        let text = strip_ends(&self.span);
        self.cells.extend(text.chars().map(|ch| Cell::new(ch, style)));
        self.reset();
    }

    fn finish(mut self) -> Vec<Cell> {
        self.rollback();
        self.cells
    }
}

/// Drop the first and last character (the delimiters).
fn strip_ends(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

fn read_color(value: &str) -> Option<Color> {
    value.trim().parse().ok()
}

/// Resolve `key:value,key:value` items on top of `default`.
fn read_style(items: &str, default: Style) -> Style {
    let mut style = default;
    for item in items.split(ITEM_SEPARATOR) {
        let Some((key, value)) = item.split_once(VALUE_SEPARATOR) else {
            continue;
        };
        if value.contains(VALUE_SEPARATOR) {
            continue;
        }
        match key.trim() {
            "fg" => {
                if let Some(color) = read_color(value) {
                    style.fg = color;
                }
            }
            "bg" => {
                if let Some(color) = read_color(value) {
                    style.bg = color;
                }
            }
            "mod" => {
                if let Some(flag) = StyleFlags::from_markup_name(value) {
                    style.modifiers |= flag;
                }
            }
            _ => {}
        }
    }
    style
}

/// Parse `text` into styled cells, one per character.
///
/// Unstyled characters get `default`. Never fails; see the module docs for
/// how malformed markup degrades.
#[must_use]
pub fn parse_styles(text: &str, default: Style) -> Vec<Cell> {
    let mut parser = Parser::new(default, text.len());
    for ch in text.chars() {
        parser.step(ch);
    }
    parser.finish()
}
