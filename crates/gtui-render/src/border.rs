#![forbid(unsafe_code)]

//! Box-drawing junction merging.
//!
//! Each light box-drawing glyph connects to some subset of its four
//! neighbours. When two borders meet in one cell, the merged glyph is the one
//! whose connections are the union of both.
//!
//! | Glyph | Connects |
//! |-------|----------|
//! | `─` | left, right |
//! | `│` | up, down |
//! | `┌ ┐ └ ┘` | the two sides of the corner |
//! | `├ ┤ ┬ ┴` | three sides |
//! | `┼` | all four |
//! | ` ` | none |

use bitflags::bitflags;

bitflags! {
    /// Directions a box-drawing glyph connects to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Connections: u8 {
        const UP = 1;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const LEFT = 1 << 3;
    }
}

pub const HORIZONTAL: char = '─';
pub const VERTICAL: char = '│';
pub const TOP_LEFT: char = '┌';
pub const TOP_RIGHT: char = '┐';
pub const BOTTOM_LEFT: char = '└';
pub const BOTTOM_RIGHT: char = '┘';
pub const VERTICAL_RIGHT: char = '├';
pub const VERTICAL_LEFT: char = '┤';
pub const HORIZONTAL_DOWN: char = '┬';
pub const HORIZONTAL_UP: char = '┴';
pub const CROSS: char = '┼';

pub const ROUNDED_TOP_LEFT: char = '╭';
pub const ROUNDED_TOP_RIGHT: char = '╮';
pub const ROUNDED_BOTTOM_LEFT: char = '╰';
pub const ROUNDED_BOTTOM_RIGHT: char = '╯';

/// Connection mask of a known glyph.
#[must_use]
pub const fn connections(glyph: char) -> Option<Connections> {
    let bits = match glyph {
        ' ' => 0,
        HORIZONTAL => Connections::LEFT.bits() | Connections::RIGHT.bits(),
        VERTICAL => Connections::UP.bits() | Connections::DOWN.bits(),
        TOP_LEFT => Connections::RIGHT.bits() | Connections::DOWN.bits(),
        TOP_RIGHT => Connections::LEFT.bits() | Connections::DOWN.bits(),
        BOTTOM_LEFT => Connections::RIGHT.bits() | Connections::UP.bits(),
        BOTTOM_RIGHT => Connections::LEFT.bits() | Connections::UP.bits(),
        VERTICAL_RIGHT => {
            Connections::UP.bits() | Connections::DOWN.bits() | Connections::RIGHT.bits()
        }
        VERTICAL_LEFT => Connections::UP.bits() | Connections::DOWN.bits() | Connections::LEFT.bits(),
        HORIZONTAL_DOWN => {
            Connections::LEFT.bits() | Connections::RIGHT.bits() | Connections::DOWN.bits()
        }
        HORIZONTAL_UP => Connections::LEFT.bits() | Connections::RIGHT.bits() | Connections::UP.bits(),
        CROSS => Connections::all().bits(),
        _ => return None,
    };
    Some(Connections::from_bits_truncate(bits))
}

/// Glyph for a connection mask, if one exists.
///
/// Single-direction stubs have no glyph.
#[must_use]
pub fn glyph_for(mask: Connections) -> Option<char> {
    const UD: Connections = Connections::UP.union(Connections::DOWN);
    const LR: Connections = Connections::LEFT.union(Connections::RIGHT);

    let glyph = match mask {
        m if m.is_empty() => ' ',
        m if m == LR => HORIZONTAL,
        m if m == UD => VERTICAL,
        m if m == Connections::RIGHT | Connections::DOWN => TOP_LEFT,
        m if m == Connections::LEFT | Connections::DOWN => TOP_RIGHT,
        m if m == Connections::RIGHT | Connections::UP => BOTTOM_LEFT,
        m if m == Connections::LEFT | Connections::UP => BOTTOM_RIGHT,
        m if m == UD | Connections::RIGHT => VERTICAL_RIGHT,
        m if m == UD | Connections::LEFT => VERTICAL_LEFT,
        m if m == LR | Connections::DOWN => HORIZONTAL_DOWN,
        m if m == LR | Connections::UP => HORIZONTAL_UP,
        m if m.is_all() => CROSS,
        _ => return None,
    };
    Some(glyph)
}

/// Merge `new` into the glyph already drawn at a cell.
///
/// Unknown glyphs on either side, or a union with no glyph, leave `new`
/// unchanged.
#[must_use]
pub fn resolve(existing: char, new: char) -> char {
    let (Some(a), Some(b)) = (connections(existing), connections(new)) else {
        return new;
    };
    glyph_for(a | b).unwrap_or(new)
}
