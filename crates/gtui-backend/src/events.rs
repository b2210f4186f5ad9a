#![forbid(unsafe_code)]

//! Event polling.
//!
//! One worker thread per poll blocks on the source's read primitive and
//! hands events to the consumer through a one-slot channel, so events
//! arrive strictly in the order the source produced them.
//!
//! Cancelling sets a flag, wakes the source, disconnects the channel and
//! joins the worker. The source bounds every read by the read cycle, so the
//! join completes within one cycle. After the join the source is returned to
//! its backend and a new poll may start.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gtui_core::event::Event;
use gtui_core::{debug, warn};

/// Outcome of one bounded read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Event(Event),
    /// The read cycle elapsed with nothing to report.
    Idle,
    /// The source was woken through its [`Waker`].
    Wake,
}

/// The input half of a screen source.
pub trait EventSource: Send {
    /// Wait at most `cycle` for the next event.
    ///
    /// An error ends the poll that is reading.
    fn read_event(&mut self, cycle: Duration) -> io::Result<SourceEvent>;

    /// Handle that makes a pending or upcoming `read_event` return
    /// [`SourceEvent::Wake`].
    fn waker(&self) -> Waker;
}

/// Injects a synthetic wake into a blocked [`EventSource`].
#[derive(Clone)]
pub struct Waker(Arc<dyn Fn() + Send + Sync>);

impl Waker {
    pub fn new(wake: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(wake))
    }

    /// Waker backed by a flag the source checks on every cycle.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self::new(move || flag.store(true, Ordering::SeqCst))
    }

    pub fn wake(&self) {
        (self.0)();
    }
}

impl std::fmt::Debug for Waker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Waker")
    }
}

/// A backend's event source while no poll holds it.
pub(crate) type SourceSlot = Arc<Mutex<Option<Box<dyn EventSource>>>>;

/// Cancels an [`EventStream`] from any thread.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    cancelled: Arc<AtomicBool>,
    waker: Waker,
}

impl CancelSignal {
    /// Stop the stream. Idempotent.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("event poll cancel requested");
        }
        self.waker.wake();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Result of [`EventStream::recv_timeout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recv {
    Event(Event),
    Timeout,
    /// The stream has ended.
    Closed,
}

/// Events from one poll, delivered one at a time.
///
/// Ends when the source fails, or when the poll is cancelled; no event is
/// returned once cancellation is visible to the consumer. Dropping the
/// stream cancels it.
pub struct EventStream {
    receiver: Option<Receiver<Event>>,
    signal: CancelSignal,
    worker: Option<JoinHandle<Box<dyn EventSource>>>,
    slot: SourceSlot,
}

impl EventStream {
    pub(crate) fn start(slot: SourceSlot, source: Box<dyn EventSource>, cycle: Duration) -> Self {
        let (sender, receiver) = mpsc::sync_channel(1);
        let signal = CancelSignal {
            cancelled: Arc::new(AtomicBool::new(false)),
            waker: source.waker(),
        };
        let cancelled = Arc::clone(&signal.cancelled);
        let worker = thread::spawn(move || run_worker(source, sender, cancelled, cycle));
        debug!(cycle_ms = cycle.as_millis() as u64, "event poll started");
        Self {
            receiver: Some(receiver),
            signal,
            worker: Some(worker),
            slot,
        }
    }

    /// A handle that cancels this stream from elsewhere.
    pub fn cancel_signal(&self) -> CancelSignal {
        self.signal.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }

    /// Block for the next event. `None` once the stream has ended.
    pub fn recv(&mut self) -> Option<Event> {
        if self.signal.is_cancelled() {
            self.shutdown();
            return None;
        }
        let event = self.receiver.as_ref()?.recv().ok();
        self.deliver(event)
    }

    /// Like [`EventStream::recv`] but gives up after `timeout`.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Recv {
        if self.signal.is_cancelled() {
            self.shutdown();
            return Recv::Closed;
        }
        let Some(receiver) = self.receiver.as_ref() else {
            return Recv::Closed;
        };
        let event = match receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => return Recv::Timeout,
            Err(RecvTimeoutError::Disconnected) => None,
        };
        match self.deliver(event) {
            Some(event) => Recv::Event(event),
            None => Recv::Closed,
        }
    }

    fn deliver(&mut self, event: Option<Event>) -> Option<Event> {
        match event {
            Some(event) if !self.signal.is_cancelled() => Some(event),
            _ => {
                self.shutdown();
                None
            }
        }
    }

    /// Cancel and wait for the worker to stop.
    pub fn cancel(mut self) {
        self.signal.cancel();
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.signal.cancelled.store(true, Ordering::SeqCst);
        self.signal.waker.wake();
        // Unblocks a worker parked on a full channel.
        self.receiver = None;
        let Some(worker) = self.worker.take() else {
            return;
        };
        match worker.join() {
            Ok(source) => {
                let mut slot = gtui_render::drawable::lock(&self.slot);
                *slot = Some(source);
                debug!("event poll stopped");
            }
            Err(_) => {
                warn!("event poll worker panicked");
            }
        }
    }

    /// Whether the worker thread has been joined.
    pub fn is_finished(&self) -> bool {
        self.worker.is_none()
    }
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl Iterator for EventStream {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.recv()
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(
    mut source: Box<dyn EventSource>,
    sender: SyncSender<Event>,
    cancelled: Arc<AtomicBool>,
    cycle: Duration,
) -> Box<dyn EventSource> {
    while !cancelled.load(Ordering::SeqCst) {
        match source.read_event(cycle) {
            Ok(SourceEvent::Event(event)) => {
                if sender.send(event).is_err() {
                    break;
                }
            }
            Ok(SourceEvent::Idle | SourceEvent::Wake) => {}
            Err(e) => {
                warn!(error = %e, "event source read failed, ending poll");
                break;
            }
        }
    }
    source
}
