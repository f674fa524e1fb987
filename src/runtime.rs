use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::app::FetchTicket;
use crate::content::{self, Content, FetchError};

/// Speed recomputation interval while a session is being typed.
pub const TICK_RATE_MS: u64 = 200;

/// Unified event type consumed by the app runner. Fetch results arrive on
/// the same channel as input so the UI thread never blocks on the network.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    Fetched {
        generation: u64,
        result: Result<Content, FetchError>,
    },
}

/// Source of events (keyboard, resize, fetch results)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if one arrives before the timeout, or Err(Timeout).
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Channel-backed event source. Production wires a crossterm reader thread
/// and fetch workers into the sender side; tests inject events directly.
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Spawns the crossterm input reader feeding `tx`.
pub fn spawn_input_thread(tx: Sender<AppEvent>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(CtEvent::Key(key)) => {
                if tx.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
            Ok(CtEvent::Resize(_, _)) => {
                if tx.send(AppEvent::Resize).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
}

/// Runs one fetch on a worker thread and posts the tagged result back.
/// The receiver drops results whose generation has been superseded.
pub fn spawn_fetch(ticket: FetchTicket, paragraph_url: String, image_url: String, tx: Sender<AppEvent>) {
    std::thread::spawn(move || {
        let source = content::source_for(ticket.mode, &paragraph_url, &image_url);
        let result = source.fetch();
        let _ = tx.send(AppEvent::Fetched {
            generation: ticket.generation,
            result,
        });
    });
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Runner that advances the application one event/tick at a time. Because
/// ticks are synthesized from the recv timeout there is exactly one tick
/// driver per process.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to the tick interval and returns the next event, or Tick
    /// on timeout.
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}
