#![forbid(unsafe_code)]

//! The output half of a screen source.

use std::io;

use gtui_render::{Buffer, Cell};

/// A cursor-addressable grid of cells that frames are flushed to.
///
/// Writes outside `size()` must be ignored by the implementation; the
/// pipeline clips before calling `put` but sizes can change between the two.
pub trait Screen: Send {
    /// Current `(width, height)` in cells.
    fn size(&self) -> (u16, u16);

    /// Blank the whole screen.
    fn clear(&mut self) -> io::Result<()>;

    /// Queue one cell at an absolute position.
    fn put(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()>;

    /// Push queued cells out.
    fn flush(&mut self) -> io::Result<()>;

    /// The screen contents, for sources that keep them in memory.
    fn contents(&self) -> Option<&Buffer> {
        None
    }
}
