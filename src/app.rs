use crate::content::{self, Content, FetchError, Mode};
use crate::session::Session;

/// Resolved provider endpoints, from config with CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub paragraph_url: String,
    pub image_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paragraph_url: content::DEFAULT_PARAGRAPH_URL.to_string(),
            image_url: content::DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

/// Handle for a fetch the caller must run. The generation is checked when
/// the result comes back; results from a superseded fetch are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub mode: Mode,
}

/// The whole application state: the active mode, the single current
/// session, and the fetch generation counter that protects it.
#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    pub session: Session,
    pub settings: Settings,
    generation: u64,
}

impl App {
    pub fn new(mode: Mode, settings: Settings) -> Self {
        Self {
            mode,
            session: Session::empty(mode),
            settings,
            generation: 0,
        }
    }

    /// Resets to a fresh loading session and hands back the ticket for the
    /// fetch that replaces it. Any earlier in-flight fetch is superseded.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.session = Session::loading(self.mode);
        FetchTicket {
            generation: self.generation,
            mode: self.mode,
        }
    }

    /// Restart retries the same provider.
    pub fn restart(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Switches content source and starts over.
    pub fn toggle_mode(&mut self) -> FetchTicket {
        self.mode = self.mode.toggled();
        self.begin_fetch()
    }

    /// Applies a resolved fetch unless a reset has superseded it since the
    /// ticket was issued.
    pub fn apply_fetch(&mut self, generation: u64, result: Result<Content, FetchError>) {
        if generation != self.generation {
            return;
        }

        self.session = match result {
            Ok(content) => Session::ready(self.mode, content),
            Err(_) => Session::failed(self.mode),
        };
    }

    pub fn write(&mut self, c: char) {
        self.session.write(c);
    }

    pub fn backspace(&mut self) {
        self.session.backspace();
    }

    pub fn on_tick(&mut self) {
        self.session.on_tick();
    }
}
