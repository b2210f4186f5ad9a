#![forbid(unsafe_code)]

//! Layout: the proportional row/column [`Grid`].

pub mod grid;

pub use grid::{Axis, Grid, GridItem};
pub use gtui_core::geometry::Rect;
