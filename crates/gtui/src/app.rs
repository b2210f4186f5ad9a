#![forbid(unsafe_code)]

//! A minimal event loop around a [`Backend`] and one root drawable.

use gtui_backend::Backend;
use gtui_core::event::Event;
use gtui_core::{debug, info};
use gtui_render::SharedDrawable;
use gtui_render::drawable::lock;

use crate::Result;

/// Identifiers that stop the loop when the handler ignores them.
pub const DEFAULT_QUIT_KEYS: [&str; 2] = ["q", "<C-c>"];

/// What the handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Consumed; quit keys are not checked.
    Handled,
    /// Not consumed; a quit key still stops the loop.
    Ignored,
    /// Stop the loop.
    Quit,
}

/// Owns the backend and the root of the drawable tree.
///
/// [`App::run`] sizes the root to the screen, renders, then for every event:
/// re-sizes the root on `<Resize>`, calls the handler, and renders again.
pub struct App {
    backend: Backend,
    root: SharedDrawable,
    quit_keys: Vec<String>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("backend", &self.backend)
            .field("quit_keys", &self.quit_keys)
            .finish()
    }
}

impl App {
    pub fn new(backend: Backend, root: SharedDrawable) -> Self {
        Self {
            backend,
            root,
            quit_keys: DEFAULT_QUIT_KEYS.iter().map(|k| (*k).to_owned()).collect(),
        }
    }

    /// Replace the quit keys. An empty list disables them.
    #[must_use]
    pub fn quit_keys(mut self, keys: &[&str]) -> Self {
        self.quit_keys = keys.iter().map(|k| (*k).to_owned()).collect();
        self
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut Backend {
        &mut self.backend
    }

    pub fn root(&self) -> &SharedDrawable {
        &self.root
    }

    /// Size the root to `(width, height)` cells at the origin.
    pub fn resize(&mut self, width: u16, height: u16) {
        lock(&self.root).set_rect(0, 0, width, height);
    }

    /// Render the root once.
    pub fn render(&mut self) -> Result<()> {
        self.backend.render(std::slice::from_ref(&self.root))?;
        Ok(())
    }

    /// Run until the handler quits, a quit key goes unhandled, or input
    /// ends. The backend stays open afterwards.
    pub fn run<F>(&mut self, mut handler: F) -> Result<()>
    where
        F: FnMut(&Event, &mut Backend) -> Control,
    {
        let (width, height) = self.backend.dimensions();
        self.resize(width, height);
        self.render()?;

        let mut events = self.backend.poll_events()?;
        info!(width, height, "app loop started");
        while let Some(event) = events.recv() {
            if let Some((width, height)) = event.resize_payload() {
                self.resize(width, height);
                self.backend.clear()?;
            }
            match handler(&event, &mut self.backend) {
                Control::Quit => break,
                Control::Ignored if self.is_quit_key(&event) => break,
                Control::Handled | Control::Ignored => {}
            }
            self.render()?;
        }
        events.cancel();
        debug!("app loop finished");
        Ok(())
    }

    fn is_quit_key(&self, event: &Event) -> bool {
        self.quit_keys.iter().any(|k| event.is(k))
    }
}
