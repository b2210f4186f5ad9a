#![forbid(unsafe_code)]

//! Input parser state machine.
//!
//! Decodes raw terminal input bytes into normalized [`Event`]s. This is the
//! driver for screen sources that only have a byte stream (a remote session)
//! rather than a local terminal with its own event reader.
//!
//! Handles:
//! - ASCII characters and C0 control codes
//! - UTF-8 multi-byte sequences
//! - CSI and SS3 cursor/function key sequences with xterm modifiers
//! - SGR mouse reports (`CSI < b ; x ; y M|m`)
//! - cursor position reports (`CSI row ; col R`), kept aside for size probing
//!
//! A lone `ESC` is ambiguous on a byte stream: it is held until the next byte
//! arrives or [`InputParser::flush_pending`] is called after an idle read.

use crate::event::{
    Event, KeyCode, MOUSE_RELEASE_ID, MOUSE_WHEEL_DOWN_ID, MOUSE_WHEEL_UP_ID, Modifiers,
    MouseButton,
};

/// DoS protection: maximum CSI sequence length.
const MAX_CSI_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ParserState {
    #[default]
    Ground,
    /// After ESC (0x1B).
    Escape,
    /// Collecting a CSI sequence (after `ESC [`).
    Csi,
    /// After `ESC O`.
    Ss3,
    /// Collecting a UTF-8 multi-byte sequence.
    Utf8 { collected: u8, expected: u8 },
}

/// Byte-stream input parser.
///
/// ```
/// use gtui_core::input_parser::InputParser;
///
/// let mut parser = InputParser::new();
/// let events = parser.parse(b"\x1b[A");
/// assert_eq!(events[0].id(), "<Up>");
/// ```
#[derive(Debug, Default)]
pub struct InputParser {
    state: ParserState,
    buffer: Vec<u8>,
    utf8_buffer: [u8; 4],
    cursor_report: Option<(u16, u16)>,
}

impl InputParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(32),
            ..Self::default()
        }
    }

    /// Parse input bytes and return any completed events, in input order.
    pub fn parse(&mut self, input: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        for &byte in input {
            if let Some(event) = self.process_byte(byte) {
                events.push(event);
            }
        }
        events
    }

    /// Resolve input held back waiting for more bytes.
    ///
    /// Call when the stream went idle. A pending lone `ESC` becomes
    /// `<Escape>`; partial sequences are dropped.
    pub fn flush_pending(&mut self) -> Option<Event> {
        let state = std::mem::take(&mut self.state);
        self.buffer.clear();
        match state {
            ParserState::Escape => Some(Event::from_key(KeyCode::Escape, Modifiers::NONE)),
            _ => None,
        }
    }

    /// Most recent cursor position report as `(column, row)`, 1-indexed.
    pub fn take_cursor_report(&mut self) -> Option<(u16, u16)> {
        self.cursor_report.take()
    }

    fn process_byte(&mut self, byte: u8) -> Option<Event> {
        match self.state {
            ParserState::Ground => self.process_ground(byte),
            ParserState::Escape => self.process_escape(byte),
            ParserState::Csi => self.process_csi(byte),
            ParserState::Ss3 => self.process_ss3(byte),
            ParserState::Utf8 {
                collected,
                expected,
            } => self.process_utf8(byte, collected, expected),
        }
    }

    fn process_ground(&mut self, byte: u8) -> Option<Event> {
        let key = |code| Some(Event::from_key(code, Modifiers::NONE));
        match byte {
            0x1B => {
                self.state = ParserState::Escape;
                None
            }
            // NUL is Ctrl+Space
            0x00 => Some(Event::from_key(KeyCode::Char(' '), Modifiers::CTRL)),
            0x09 => key(KeyCode::Tab),
            0x0D => key(KeyCode::Enter),
            0x01..=0x08 | 0x0A..=0x0C | 0x0E..=0x1A => {
                let c = (byte + b'a' - 1) as char;
                Some(Event::from_key(KeyCode::Char(c), Modifiers::CTRL))
            }
            0x7F => key(KeyCode::Backspace),
            0x20..=0x7E => key(KeyCode::Char(byte as char)),
            0xC0..=0xDF => self.begin_utf8(byte, 2),
            0xE0..=0xEF => self.begin_utf8(byte, 3),
            0xF0..=0xF7 => self.begin_utf8(byte, 4),
            _ => None,
        }
    }

    fn begin_utf8(&mut self, lead: u8, expected: u8) -> Option<Event> {
        self.utf8_buffer[0] = lead;
        self.state = ParserState::Utf8 {
            collected: 1,
            expected,
        };
        None
    }

    fn process_escape(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'[' => {
                self.state = ParserState::Csi;
                self.buffer.clear();
                None
            }
            b'O' => {
                self.state = ParserState::Ss3;
                None
            }
            // ESC ESC: the first one was a real Escape press
            0x1B => Some(Event::from_key(KeyCode::Escape, Modifiers::NONE)),
            0x20..=0x7E => {
                self.state = ParserState::Ground;
                Some(Event::from_key(KeyCode::Char(byte as char), Modifiers::ALT))
            }
            _ => {
                self.state = ParserState::Ground;
                None
            }
        }
    }

    fn process_csi(&mut self, byte: u8) -> Option<Event> {
        if self.buffer.len() >= MAX_CSI_LEN {
            self.state = ParserState::Ground;
            self.buffer.clear();
            return None;
        }
        self.buffer.push(byte);

        match byte {
            b'0'..=b'9' | b';' | b':' | b'<' | b'=' | b'>' | b'?' => None,
            b'A'..=b'Z' | b'a'..=b'z' | b'~' => {
                self.state = ParserState::Ground;
                self.parse_csi_sequence()
            }
            _ => {
                self.state = ParserState::Ground;
                self.buffer.clear();
                None
            }
        }
    }

    fn parse_csi_sequence(&mut self) -> Option<Event> {
        let seq = std::mem::take(&mut self.buffer);
        let (&final_byte, params) = seq.split_last()?;

        if params.first() == Some(&b'<') && (final_byte == b'M' || final_byte == b'm') {
            return parse_sgr_mouse(&params[1..], final_byte);
        }

        let key = |code| Some(Event::from_key(code, modifier_param(params)));
        match final_byte {
            b'A' => key(KeyCode::Up),
            b'B' => key(KeyCode::Down),
            b'C' => key(KeyCode::Right),
            b'D' => key(KeyCode::Left),
            b'H' => key(KeyCode::Home),
            b'F' => key(KeyCode::End),
            b'Z' => Some(Event::from_key(KeyCode::BackTab, Modifiers::NONE)),
            b'R' => {
                let mut nums = numeric_params(params);
                if let (Some(row), Some(col)) = (nums.next(), nums.next()) {
                    self.cursor_report = Some((col as u16, row as u16));
                }
                None
            }
            b'~' => parse_csi_tilde(params),
            _ => None,
        }
    }

    fn process_ss3(&mut self, byte: u8) -> Option<Event> {
        self.state = ParserState::Ground;

        let code = match byte {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            _ => return None,
        };
        Some(Event::from_key(code, Modifiers::NONE))
    }

    fn process_utf8(&mut self, byte: u8, collected: u8, expected: u8) -> Option<Event> {
        if (byte & 0xC0) != 0x80 {
            self.state = ParserState::Ground;
            return None;
        }

        self.utf8_buffer[collected as usize] = byte;
        let collected = collected + 1;
        if collected < expected {
            self.state = ParserState::Utf8 {
                collected,
                expected,
            };
            return None;
        }

        self.state = ParserState::Ground;
        let s = std::str::from_utf8(&self.utf8_buffer[..expected as usize]).ok()?;
        let c = s.chars().next()?;
        Some(Event::from_key(KeyCode::Char(c), Modifiers::NONE))
    }
}

fn numeric_params(params: &[u8]) -> impl Iterator<Item = u32> + '_ {
    params
        .split(|&b| b == b';')
        .map(|p| std::str::from_utf8(p).ok().and_then(|s| s.parse().ok()).unwrap_or(0))
}

/// xterm encodes modifiers as `1 + bits` in the second parameter.
fn modifier_param(params: &[u8]) -> Modifiers {
    let value = numeric_params(params).nth(1).unwrap_or(1);
    let bits = value.saturating_sub(1);
    let mut mods = Modifiers::NONE;
    if bits & 1 != 0 {
        mods |= Modifiers::SHIFT;
    }
    if bits & 2 != 0 {
        mods |= Modifiers::ALT;
    }
    if bits & 4 != 0 {
        mods |= Modifiers::CTRL;
    }
    mods
}

fn parse_csi_tilde(params: &[u8]) -> Option<Event> {
    let code = match numeric_params(params).next()? {
        1 | 7 => KeyCode::Home,
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,
        11 => KeyCode::F(1),
        12 => KeyCode::F(2),
        13 => KeyCode::F(3),
        14 => KeyCode::F(4),
        15 => KeyCode::F(5),
        17 => KeyCode::F(6),
        18 => KeyCode::F(7),
        19 => KeyCode::F(8),
        20 => KeyCode::F(9),
        21 => KeyCode::F(10),
        23 => KeyCode::F(11),
        24 => KeyCode::F(12),
        _ => return None,
    };
    Some(Event::from_key(code, modifier_param(params)))
}

/// `b ; x ; y` with 1-indexed coordinates.
fn parse_sgr_mouse(params: &[u8], final_byte: u8) -> Option<Event> {
    let s = std::str::from_utf8(params).ok()?;
    let mut parts = s.split(';');
    let code: u16 = parts.next()?.parse().ok()?;
    let x = parts.next()?.parse::<u16>().ok()?.saturating_sub(1);
    let y = parts.next()?.parse::<u16>().ok()?.saturating_sub(1);

    let button = match code & 0b11 {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    };

    if code & 64 != 0 {
        let id = if code & 1 == 0 {
            MOUSE_WHEEL_UP_ID
        } else {
            MOUSE_WHEEL_DOWN_ID
        };
        return Some(Event::mouse(id, x, y, false));
    }
    if final_byte == b'm' {
        return Some(Event::mouse(MOUSE_RELEASE_ID, x, y, false));
    }
    let drag = code & 32 != 0;
    // Motion with no button held has no identifier.
    let button = button?;
    Some(Event::mouse(button.identifier(), x, y, drag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, MousePayload};

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(Event::id).collect()
    }

    #[test]
    fn ascii_characters_parsed() {
        let mut parser = InputParser::new();
        let events = parser.parse(b"abc");
        assert_eq!(ids(&events), ["a", "b", "c"]);
    }

    #[test]
    fn control_characters() {
        let mut parser = InputParser::new();
        let events = parser.parse(&[0x01, 0x03, 0x09, 0x0D, 0x7F, 0x00]);
        assert_eq!(
            ids(&events),
            ["<C-a>", "<C-c>", "<Tab>", "<Enter>", "<Backspace>", "<C-<Space>>"]
        );
    }

    #[test]
    fn arrow_and_ss3_keys() {
        let mut parser = InputParser::new();
        let events = parser.parse(b"\x1b[A\x1b[B\x1bOC\x1bOD\x1bOP");
        assert_eq!(ids(&events), ["<Up>", "<Down>", "<Right>", "<Left>", "<F1>"]);
    }

    #[test]
    fn tilde_keys() {
        let mut parser = InputParser::new();
        let events = parser.parse(b"\x1b[2~\x1b[3~\x1b[5~\x1b[6~\x1b[15~\x1b[24~");
        assert_eq!(
            ids(&events),
            ["<Insert>", "<Delete>", "<PageUp>", "<PageDown>", "<F5>", "<F12>"]
        );
    }

    #[test]
    fn alt_chars() {
        let mut parser = InputParser::new();
        let events = parser.parse(b"\x1bx");
        assert_eq!(ids(&events), ["<M-x>"]);
    }

    #[test]
    fn lone_escape_needs_flush() {
        let mut parser = InputParser::new();
        assert!(parser.parse(b"\x1b").is_empty());
        let ev = parser.flush_pending().unwrap();
        assert_eq!(ev.id(), "<Escape>");
        assert!(parser.flush_pending().is_none());
        assert_eq!(ids(&parser.parse(b"q")), ["q"]);
    }

    #[test]
    fn double_escape_emits_one_and_keeps_waiting() {
        let mut parser = InputParser::new();
        let events = parser.parse(b"\x1b\x1b[A");
        assert_eq!(ids(&events), ["<Escape>", "<Up>"]);
    }

    #[test]
    fn utf8_characters() {
        let mut parser = InputParser::new();
        let events = parser.parse("é世🦀".as_bytes());
        assert_eq!(ids(&events), ["é", "世", "🦀"]);
    }

    #[test]
    fn sgr_mouse_press_drag_release_wheel() {
        let mut parser = InputParser::new();
        let events = parser.parse(b"\x1b[<0;10;5M\x1b[<32;11;5M\x1b[<0;11;5m\x1b[<64;1;1M\x1b[<65;1;1M");
        assert_eq!(
            ids(&events),
            [
                "<MouseLeft>",
                "<MouseLeft>",
                "<MouseRelease>",
                "<MouseWheelUp>",
                "<MouseWheelDown>"
            ]
        );
        assert_eq!(events[0].kind(), EventKind::Mouse);
        assert_eq!(
            events[0].mouse_payload(),
            Some(MousePayload {
                x: 9,
                y: 4,
                drag: false
            })
        );
        assert!(events[1].mouse_payload().unwrap().drag);
    }

    #[test]
    fn bare_motion_is_ignored() {
        let mut parser = InputParser::new();
        assert!(parser.parse(b"\x1b[<35;3;3M").is_empty());
    }

    #[test]
    fn cursor_report_is_captured_not_emitted() {
        let mut parser = InputParser::new();
        let events = parser.parse(b"\x1b[40;120R");
        assert!(events.is_empty());
        assert_eq!(parser.take_cursor_report(), Some((120, 40)));
        assert_eq!(parser.take_cursor_report(), None);
    }

    #[test]
    fn modifiers_in_csi() {
        let mut parser = InputParser::new();
        // Ctrl+Up has no canonical identifier of its own; it degrades to <Up>.
        let events = parser.parse(b"\x1b[1;5A");
        assert_eq!(ids(&events), ["<Up>"]);
    }

    #[test]
    fn oversized_csi_is_dropped() {
        let mut parser = InputParser::new();
        let mut input = b"\x1b[".to_vec();
        input.extend(std::iter::repeat_n(b'1', MAX_CSI_LEN + 10));
        input.push(b'A');
        input.push(b'z');
        let events = parser.parse(&input);
        assert_eq!(events.last().map(Event::id), Some("z"));
    }

    #[test]
    fn no_panic_on_invalid_input() {
        let mut parser = InputParser::new();
        let garbage = [0xFF, 0xFE, 0x00, 0x1B, 0x1B, 0x1B, b'[', 0xFF, b']', 0x00, 0xE4, 0x41];
        let _ = parser.parse(&garbage);
    }
}
