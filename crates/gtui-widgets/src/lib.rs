#![forbid(unsafe_code)]

//! Widgets: a bordered, titled [`Block`] and the markup-aware
//! [`Paragraph`] drawn inside one.

pub mod block;
pub mod paragraph;

pub use block::{Alignment, Block, BorderGradient, GradientDirection};
pub use paragraph::{Paragraph, VerticalAlignment};
