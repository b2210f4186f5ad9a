#![forbid(unsafe_code)]

//! Styled text: the inline style markup, gradient text, and helpers over
//! cell sequences.

pub mod cells;
pub mod gradient;
pub mod markup;

pub use cells::{
    CellWithX, cells_to_string, cells_with_x, split_cells, styled_cells, trim_cells, wrap_cells,
};
pub use gradient::apply_gradient_to_text;
pub use markup::parse_styles;
