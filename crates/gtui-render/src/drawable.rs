#![forbid(unsafe_code)]

//! The contract every widget satisfies to take part in layout and rendering.

use std::sync::{Arc, Mutex, MutexGuard};

use gtui_core::geometry::Rect;

use crate::buffer::Buffer;

/// Anything with a rectangle and a paint callback.
///
/// Layout assigns the rectangle with [`Drawable::set_rect`]; the render
/// pipeline then calls [`Drawable::draw`] while holding the drawable's own
/// lock (see [`SharedDrawable`]).
pub trait Drawable: Send {
    /// The rectangle currently assigned to this drawable.
    fn rect(&self) -> Rect;

    /// Assign the rectangle with corners `(x1, y1)` inclusive and `(x2, y2)`
    /// exclusive.
    fn set_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16);

    /// Paint into `buf` using absolute coordinates.
    fn draw(&self, buf: &mut Buffer);
}

/// A drawable behind its own exclusive lock.
///
/// The application keeps one clone to mutate widget data; layout and the
/// render pipeline keep others. Each clone locks the same drawable.
pub type SharedDrawable = Arc<Mutex<dyn Drawable>>;

/// Wrap a drawable for shared use.
pub fn shared<D: Drawable + 'static>(drawable: D) -> Arc<Mutex<D>> {
    Arc::new(Mutex::new(drawable))
}

/// Acquire a drawable's lock.
///
/// A drawable whose previous holder panicked is still handed out: one
/// misbehaving widget must not stop every later frame.
pub fn lock<D: ?Sized>(drawable: &Mutex<D>) -> MutexGuard<'_, D> {
    drawable
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
