#![forbid(unsafe_code)]

//! In-memory screen and event queue.
//!
//! Used for deterministic tests and for screenshot capture. Frames land in a
//! [`Buffer`]; events are whatever the test pushes through
//! [`SimulatedInput`].

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use gtui_core::event::Event;
use gtui_render::drawable::lock;
use gtui_render::{Buffer, Cell};

use crate::events::{EventSource, SourceEvent, Waker};
use crate::screen::Screen;

/// A fixed-size screen backed by a [`Buffer`].
#[derive(Debug, Clone)]
pub struct SimulatedScreen {
    buffer: Buffer,
    flushes: usize,
}

impl SimulatedScreen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::with_size(width, height),
            flushes: 0,
        }
    }

    /// Number of completed flushes.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Screen for SimulatedScreen {
    fn size(&self) -> (u16, u16) {
        (self.buffer.width(), self.buffer.height())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.buffer.clear();
        Ok(())
    }

    fn put(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        self.buffer.set(x, y, *cell);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn contents(&self) -> Option<&Buffer> {
        Some(&self.buffer)
    }
}

#[derive(Debug, Default)]
struct Queue {
    events: VecDeque<Event>,
    woken: bool,
}

#[derive(Debug, Default)]
struct Shared {
    queue: Mutex<Queue>,
    ready: Condvar,
}

/// Feeds events to a simulated backend. Clones share one queue.
#[derive(Debug, Clone)]
pub struct SimulatedInput {
    shared: Arc<Shared>,
}

impl SimulatedInput {
    /// Queue an event for the next poll read.
    pub fn push(&self, event: Event) {
        lock(&self.shared.queue).events.push_back(event);
        self.shared.ready.notify_all();
    }

    /// Queue a keyboard event by identifier.
    pub fn key(&self, id: &str) {
        self.push(Event::key(id));
    }

    /// Events queued but not yet read.
    pub fn pending(&self) -> usize {
        lock(&self.shared.queue).events.len()
    }
}

/// Event source reading from a [`SimulatedInput`] queue.
#[derive(Debug)]
pub struct SimulatedSource {
    shared: Arc<Shared>,
}

/// A connected source and input handle.
pub fn simulated_source() -> (SimulatedSource, SimulatedInput) {
    let shared = Arc::new(Shared::default());
    (
        SimulatedSource {
            shared: Arc::clone(&shared),
        },
        SimulatedInput { shared },
    )
}

impl EventSource for SimulatedSource {
    fn read_event(&mut self, cycle: Duration) -> io::Result<SourceEvent> {
        let mut queue = lock(&self.shared.queue);
        if queue.events.is_empty() && !queue.woken {
            queue = match self.shared.ready.wait_timeout(queue, cycle) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        if std::mem::take(&mut queue.woken) {
            return Ok(SourceEvent::Wake);
        }
        Ok(match queue.events.pop_front() {
            Some(event) => SourceEvent::Event(event),
            None => SourceEvent::Idle,
        })
    }

    fn waker(&self) -> Waker {
        let shared = Arc::clone(&self.shared);
        Waker::new(move || {
            lock(&shared.queue).woken = true;
            shared.ready.notify_all();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtui_style::{Color, Style};

    #[test]
    fn screen_records_cells() {
        let mut screen = SimulatedScreen::new(4, 2);
        assert_eq!(screen.size(), (4, 2));
        let cell = Cell::new('x', Style::with_fg(Color::RED));
        screen.put(1, 1, &cell).unwrap();
        screen.put(9, 9, &cell).unwrap();
        screen.flush().unwrap();
        let contents = screen.contents().unwrap();
        assert_eq!(contents.get(1, 1), cell);
        assert_eq!(contents.row_text(1), " x  ");
        assert_eq!(screen.flushes(), 1);

        screen.clear().unwrap();
        assert!(screen.contents().unwrap().get(1, 1).is_clear());
    }

    #[test]
    fn source_reads_in_order_then_idles() {
        let (mut source, input) = simulated_source();
        input.key("a");
        input.key("b");
        assert_eq!(input.pending(), 2);
        let cycle = Duration::from_millis(5);
        assert_eq!(source.read_event(cycle).unwrap(), SourceEvent::Event(Event::key("a")));
        assert_eq!(source.read_event(cycle).unwrap(), SourceEvent::Event(Event::key("b")));
        assert_eq!(source.read_event(cycle).unwrap(), SourceEvent::Idle);
    }

    #[test]
    fn wake_interrupts_a_blocked_read() {
        let (mut source, _input) = simulated_source();
        let waker = source.waker();
        let handle = std::thread::spawn(move || source.read_event(Duration::from_secs(30)));
        std::thread::sleep(Duration::from_millis(20));
        waker.wake();
        assert_eq!(handle.join().unwrap().unwrap(), SourceEvent::Wake);
    }
}
