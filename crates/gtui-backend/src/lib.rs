#![forbid(unsafe_code)]

//! Backend: owns a screen (local terminal, in-memory, or remote stream),
//! turns input into an [`EventStream`], and runs the render pipeline.
//!
//! # Example
//!
//! ```
//! use gtui_backend::{Backend, Config};
//! use gtui_core::geometry::Rect;
//! use gtui_render::{Buffer, Drawable, SharedDrawable, drawable};
//!
//! struct Dot(Rect);
//!
//! impl Drawable for Dot {
//!     fn rect(&self) -> Rect { self.0 }
//!     fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16) {
//!         self.0 = Rect::from_corners(x1, y1, x2, y2);
//!     }
//!     fn draw(&self, buf: &mut Buffer) {
//!         buf.set(self.0.x, self.0.y, '*'.into());
//!     }
//! }
//!
//! let mut backend = Backend::with_config(Config::simulated(4, 2)).unwrap();
//! let dot: SharedDrawable = drawable::shared(Dot(Rect::new(2, 1, 1, 1)));
//! backend.render(&[dot]).unwrap();
//! assert_eq!(backend.snapshot().unwrap().row_text(1), "  * ");
//! ```

pub mod backend;
pub mod capture;
pub mod config;
pub mod error;
pub mod events;
mod font;
pub mod pipeline;
pub mod remote;
pub mod screen;
pub mod simulated;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use backend::{Backend, State};
pub use capture::{capture, rasterize, save_image};
pub use config::{Config, Duplex, Source};
pub use error::BackendError;
pub use events::{CancelSignal, EventSource, EventStream, Recv, SourceEvent, Waker};
pub use screen::Screen;
pub use simulated::{SimulatedInput, SimulatedScreen};
