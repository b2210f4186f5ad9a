#![forbid(unsafe_code)]

//! Normalized input events.
//!
//! Every input, whatever its origin (local terminal, byte stream, simulated
//! queue), is reduced to an [`Event`]: a kind, a canonical identifier string
//! and a kind-specific payload. Identifiers follow a fixed vocabulary:
//!
//! - keyboard: a literal character (`"j"`, `"J"`), `<C-a>`..`<C-z>`, `<M-x>`,
//!   `<Up>` `<Down>` `<Left>` `<Right>`, `<Insert>` `<Delete>` `<Home>` `<End>`
//!   `<PageUp>` `<PageDown>`, `<F1>`..`<F12>`, `<Tab>` `<Backtab>` `<Enter>`
//!   `<Escape>` `<Backspace>` `<Space>`, and `<Key:...>` for anything unmapped
//! - mouse: `<MouseLeft>` `<MouseMiddle>` `<MouseRight>` `<MouseRelease>`
//!   `<MouseWheelUp>` `<MouseWheelDown>`
//! - terminal: `<Resize>`
//!
//! Events are immutable once built; fields are reachable only via accessors.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Identifier carried by every resize event.
pub const RESIZE_ID: &str = "<Resize>";

/// Broad category of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Keyboard,
    Mouse,
    Resize,
}

/// Cursor position and drag flag of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MousePayload {
    /// Column, 0-indexed.
    pub x: u16,
    /// Row, 0-indexed.
    pub y: u16,
    /// The pointer moved while the button was held.
    pub drag: bool,
}

/// Kind-specific event data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Payload {
    /// Keyboard events carry nothing beyond their identifier.
    #[default]
    None,
    Mouse(MousePayload),
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    id: String,
    payload: Payload,
}

impl Event {
    /// Keyboard event with the given canonical identifier.
    #[must_use]
    pub fn key(id: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Keyboard,
            id: id.into(),
            payload: Payload::None,
        }
    }

    /// Keyboard event built from a decoded key and its modifiers.
    #[must_use]
    pub fn from_key(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::key(key_identifier(code, modifiers))
    }

    /// Mouse event with the given identifier and position.
    #[must_use]
    pub fn mouse(id: impl Into<String>, x: u16, y: u16, drag: bool) -> Self {
        Self {
            kind: EventKind::Mouse,
            id: id.into(),
            payload: Payload::Mouse(MousePayload { x, y, drag }),
        }
    }

    /// Terminal resize event.
    #[must_use]
    pub fn resize(width: u16, height: u16) -> Self {
        Self {
            kind: EventKind::Resize,
            id: RESIZE_ID.to_owned(),
            payload: Payload::Resize { width, height },
        }
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Canonical identifier, e.g. `"<Enter>"` or `"q"`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn payload(&self) -> Payload {
        self.payload
    }

    /// Check the identifier.
    #[inline]
    pub fn is(&self, id: &str) -> bool {
        self.id == id
    }

    /// Mouse position and drag flag, if this is a mouse event.
    pub fn mouse_payload(&self) -> Option<MousePayload> {
        match self.payload {
            Payload::Mouse(m) => Some(m),
            _ => None,
        }
    }

    /// New `(width, height)`, if this is a resize event.
    pub fn resize_payload(&self) -> Option<(u16, u16)> {
        match self.payload {
            Payload::Resize { width, height } => Some((width, height)),
            _ => None,
        }
    }

    /// Convert a crossterm event.
    ///
    /// Returns `None` for inputs with no canonical identifier (key release,
    /// bare pointer motion, horizontal scroll, paste, focus changes).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => map_key_event(key),
            cte::Event::Mouse(mouse) => map_mouse_event(mouse),
            cte::Event::Resize(width, height) => Some(Self::resize(width, height)),
            cte::Event::Paste(_) | cte::Event::FocusGained | cte::Event::FocusLost => None,
        }
    }
}

/// Decoded key, before it is turned into an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    /// Function key `F1`..`F24`.
    F(u8),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Escape,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Null,
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
    }
}

/// Mouse button, for identifier lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Canonical identifier of a press or drag with this button.
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Left => "<MouseLeft>",
            Self::Middle => "<MouseMiddle>",
            Self::Right => "<MouseRight>",
        }
    }
}

/// Identifier for button release.
pub const MOUSE_RELEASE_ID: &str = "<MouseRelease>";
/// Identifier for wheel up.
pub const MOUSE_WHEEL_UP_ID: &str = "<MouseWheelUp>";
/// Identifier for wheel down.
pub const MOUSE_WHEEL_DOWN_ID: &str = "<MouseWheelDown>";

/// Canonical identifier of a key.
pub fn key_identifier(code: KeyCode, modifiers: Modifiers) -> String {
    match code {
        KeyCode::Char(c) if modifiers.contains(Modifiers::CTRL) => match c {
            ' ' => "<C-<Space>>".to_owned(),
            c if c.is_ascii_alphabetic() => format!("<C-{}>", c.to_ascii_lowercase()),
            c => format!("<Key:C-{c}>"),
        },
        KeyCode::Char(c) if modifiers.contains(Modifiers::ALT) => format!("<M-{c}>"),
        KeyCode::Char(' ') => "<Space>".to_owned(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n @ 1..=12) => format!("<F{n}>"),
        KeyCode::F(n) => format!("<Key:F{n}>"),
        KeyCode::Null => "<Key:Null>".to_owned(),
        named => named_key_identifier(named).to_owned(),
    }
}

fn named_key_identifier(code: KeyCode) -> &'static str {
    match code {
        KeyCode::Enter => "<Enter>",
        KeyCode::Tab => "<Tab>",
        KeyCode::BackTab => "<Backtab>",
        KeyCode::Backspace => "<Backspace>",
        KeyCode::Escape => "<Escape>",
        KeyCode::Insert => "<Insert>",
        KeyCode::Delete => "<Delete>",
        KeyCode::Home => "<Home>",
        KeyCode::End => "<End>",
        KeyCode::PageUp => "<PageUp>",
        KeyCode::PageDown => "<PageDown>",
        KeyCode::Up => "<Up>",
        KeyCode::Down => "<Down>",
        KeyCode::Left => "<Left>",
        KeyCode::Right => "<Right>",
        KeyCode::Char(_) | KeyCode::F(_) | KeyCode::Null => "<Key:?>",
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_event(event: cte::KeyEvent) -> Option<Event> {
    if event.kind == cte::KeyEventKind::Release {
        return None;
    }
    let modifiers = map_modifiers(event.modifiers);
    let id = match map_key_code(event.code) {
        Some(code) => key_identifier(code, modifiers),
        None => format!("<Key:{:?}>", event.code),
    };
    Some(Event::key(id))
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::PageUp => Some(KeyCode::PageUp),
        cte::KeyCode::PageDown => Some(KeyCode::PageDown),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Delete => Some(KeyCode::Delete),
        cte::KeyCode::Insert => Some(KeyCode::Insert),
        cte::KeyCode::F(n) => Some(KeyCode::F(n)),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Null => Some(KeyCode::Null),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    mapped
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_event(event: cte::MouseEvent) -> Option<Event> {
    let (id, drag) = match event.kind {
        cte::MouseEventKind::Down(button) => (map_mouse_button(button).identifier(), false),
        cte::MouseEventKind::Drag(button) => (map_mouse_button(button).identifier(), true),
        cte::MouseEventKind::Up(_) => (MOUSE_RELEASE_ID, false),
        cte::MouseEventKind::ScrollUp => (MOUSE_WHEEL_UP_ID, false),
        cte::MouseEventKind::ScrollDown => (MOUSE_WHEEL_DOWN_ID, false),
        cte::MouseEventKind::Moved
        | cte::MouseEventKind::ScrollLeft
        | cte::MouseEventKind::ScrollRight => return None,
    };
    Some(Event::mouse(id, event.column, event.row, drag))
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_button(button: cte::MouseButton) -> MouseButton {
    match button {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    }
}
