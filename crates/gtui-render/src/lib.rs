#![forbid(unsafe_code)]

//! Render kernel: cells, the frame buffer, border merging, the drawable
//! contract, and ANSI presentation.

pub mod ansi;
pub mod border;
pub mod buffer;
pub mod cell;
pub mod drawable;
pub mod drawing;
pub mod presenter;

pub use buffer::Buffer;
pub use cell::Cell;
pub use drawable::{Drawable, SharedDrawable};
pub use drawing::{BorderChars, Borders, Draw};
