use crate::content::{Content, Mode};
use crate::metrics;
use std::time::SystemTime;

/// Lifecycle of one practice attempt. Nothing leaves `Complete` except a
/// fresh fetch replacing the session wholesale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loading,
    Ready,
    Typing,
    Complete,
    Error,
}

/// Per-character render state for the target display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Incorrect,
    Untyped,
}

/// One practice attempt against a fetched target text. Created whole on
/// every fetch and replaced whole on the next one; no state survives a
/// reset.
#[derive(Debug)]
pub struct Session {
    pub mode: Mode,
    pub phase: Phase,
    pub image_url: Option<String>,
    target: Vec<char>,
    target_text: String,
    typed: Vec<char>,
    started_at: Option<SystemTime>,
    pub correct_count: usize,
    pub error_count: usize,
    pub accuracy: f64,
    pub wpm: f64,
}

impl Session {
    fn with_phase(mode: Mode, phase: Phase) -> Self {
        Self {
            mode,
            phase,
            image_url: None,
            target: Vec::new(),
            target_text: String::new(),
            typed: Vec::new(),
            started_at: None,
            correct_count: 0,
            error_count: 0,
            accuracy: 100.0,
            wpm: 0.0,
        }
    }

    /// Blank session shown before the first fetch is issued.
    pub fn empty(mode: Mode) -> Self {
        Self::with_phase(mode, Phase::Empty)
    }

    /// A fetch is in flight; input is disabled until it resolves.
    pub fn loading(mode: Mode) -> Self {
        Self::with_phase(mode, Phase::Loading)
    }

    /// Fetch resolved; target is set and input is enabled.
    pub fn ready(mode: Mode, content: Content) -> Self {
        let mut session = Self::with_phase(mode, Phase::Ready);
        session.target = content.target.chars().collect();
        session.target_text = content.target;
        session.image_url = content.image_url;
        session
    }

    /// Fetch failed; input stays disabled until a manual restart.
    pub fn failed(mode: Mode) -> Self {
        Self::with_phase(mode, Phase::Error)
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    pub fn typed_text(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn cursor_pos(&self) -> usize {
        self.typed.len()
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Ready | Phase::Typing)
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Render state of the target char at `idx`.
    pub fn char_state(&self, idx: usize) -> CharState {
        match self.typed.get(idx) {
            None => CharState::Untyped,
            Some(c) if self.target.get(idx) == Some(c) => CharState::Correct,
            Some(_) => CharState::Incorrect,
        }
    }

    /// Appends one typed char and recomputes everything. The first
    /// keystroke of the session starts the clock, right or wrong.
    pub fn write(&mut self, c: char) {
        if !self.accepts_input() {
            return;
        }

        if self.phase == Phase::Ready {
            self.phase = Phase::Typing;
            self.started_at = Some(SystemTime::now());
        }

        self.typed.push(c);
        self.recompute();

        if !self.target.is_empty() && self.typed == self.target {
            self.phase = Phase::Complete;
            // one final speed computation; ticks are ignored from here on
            self.update_speed();
        }
    }

    /// Removes the last typed char. Does not rewind a completed session.
    pub fn backspace(&mut self) {
        if self.phase != Phase::Typing {
            return;
        }

        self.typed.pop();
        self.recompute();
    }

    /// Periodic speed refresh; inert outside the Typing phase so a stale
    /// tick can never revive a finished or replaced session.
    pub fn on_tick(&mut self) {
        if self.phase == Phase::Typing {
            self.update_speed();
        }
    }

    fn recompute(&mut self) {
        let (correct, errors) = metrics::compare(&self.typed, &self.target);
        self.correct_count = correct;
        self.error_count = errors;
        self.accuracy = metrics::accuracy(correct, self.typed.len());
    }

    fn update_speed(&mut self) {
        if let Some(started_at) = self.started_at {
            if let Ok(elapsed) = started_at.elapsed() {
                let words = metrics::word_count(&self.typed_text());
                self.wpm = metrics::words_per_minute(words, elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session(target: &str) -> Session {
        Session::ready(Mode::Text, Content::text(target))
    }

    #[test]
    fn test_fresh_session_metrics_are_zeroed() {
        for session in [
            Session::empty(Mode::Text),
            Session::loading(Mode::Image),
            ready_session("cat"),
            Session::failed(Mode::Text),
        ] {
            assert_eq!(session.wpm, 0.0);
            assert_eq!(session.accuracy, 100.0);
            assert_eq!(session.error_count, 0);
            assert!(!session.has_started());
        }
    }

    #[test]
    fn test_input_disabled_until_ready() {
        let mut session = Session::loading(Mode::Text);
        session.write('c');
        assert_eq!(session.cursor_pos(), 0);
        assert_eq!(session.phase, Phase::Loading);

        let mut session = Session::failed(Mode::Text);
        session.write('c');
        assert_eq!(session.cursor_pos(), 0);
        assert_eq!(session.phase, Phase::Error);
    }

    #[test]
    fn test_first_keystroke_starts_session() {
        let mut session = ready_session("cat");
        assert!(!session.has_started());

        session.write('x');
        assert!(session.has_started());
        assert_eq!(session.phase, Phase::Typing);
    }

    #[test]
    fn test_clean_run_completes_exactly_at_full_match() {
        let mut session = ready_session("cat");

        session.write('c');
        assert_eq!(session.error_count, 0);
        assert_eq!(session.phase, Phase::Typing);

        session.write('a');
        assert_eq!(session.error_count, 0);
        assert_eq!(session.phase, Phase::Typing);

        session.write('t');
        assert_eq!(session.error_count, 0);
        assert_eq!(session.phase, Phase::Complete);
        assert_eq!(session.accuracy, 100.0);
    }

    #[test]
    fn test_single_error_accuracy() {
        let mut session = ready_session("cat");
        for c in "cot".chars() {
            session.write(c);
        }

        assert_eq!(session.error_count, 1);
        assert_eq!(session.correct_count, 2);
        assert_eq!(session.accuracy, 67.0);
        assert_eq!(session.phase, Phase::Typing);
    }

    #[test]
    fn test_no_completion_on_wrong_full_length_input() {
        let mut session = ready_session("cat");
        for c in "car".chars() {
            session.write(c);
        }

        assert_eq!(session.phase, Phase::Typing);
    }

    #[test]
    fn test_input_longer_than_target_counts_errors() {
        // a non-matching prefix keeps the session open past the target's
        // length; the overflow char is an error like any other mismatch
        let mut session = ready_session("cat");
        for c in "caxs".chars() {
            session.write(c);
        }

        assert_eq!(session.correct_count, 2);
        assert_eq!(session.error_count, 2);
        assert_eq!(session.cursor_pos(), 4);
        assert_eq!(session.phase, Phase::Typing);
    }

    #[test]
    fn test_backspace_recomputes_from_scratch() {
        let mut session = ready_session("cat");
        for c in "cot".chars() {
            session.write(c);
        }
        assert_eq!(session.error_count, 1);

        session.backspace();
        session.backspace();
        assert_eq!(session.error_count, 0);
        assert_eq!(session.correct_count, 1);

        // fix the mistake and finish
        session.write('a');
        session.write('t');
        assert_eq!(session.phase, Phase::Complete);
    }

    #[test]
    fn test_backspace_to_empty_restores_perfect_accuracy() {
        let mut session = ready_session("cat");
        session.write('x');
        assert_eq!(session.accuracy, 0.0);

        session.backspace();
        assert_eq!(session.accuracy, 100.0);
        assert_eq!(session.error_count, 0);
        // the clock keeps running; only a fresh fetch resets it
        assert!(session.has_started());
    }

    #[test]
    fn test_completed_session_locks_input() {
        let mut session = ready_session("hi");
        session.write('h');
        session.write('i');
        assert!(session.is_complete());

        session.write('!');
        assert_eq!(session.cursor_pos(), 2);

        session.backspace();
        assert_eq!(session.cursor_pos(), 2);
        assert!(session.is_complete());
    }

    #[test]
    fn test_ticks_are_inert_outside_typing() {
        let mut session = ready_session("hi");
        session.on_tick();
        assert_eq!(session.wpm, 0.0);

        session.write('h');
        session.write('i');
        let final_wpm = session.wpm;

        session.on_tick();
        assert_eq!(session.wpm, final_wpm);
    }

    #[test]
    fn test_char_states_for_display() {
        let mut session = ready_session("cat");
        session.write('c');
        session.write('o');

        assert_eq!(session.char_state(0), CharState::Correct);
        assert_eq!(session.char_state(1), CharState::Incorrect);
        assert_eq!(session.char_state(2), CharState::Untyped);
    }

    #[test]
    fn test_image_session_carries_resolved_url() {
        let content = Content {
            target: "A city skyline at sunset.".to_string(),
            image_url: Some("https://example.com/a.jpg".to_string()),
        };
        let session = Session::ready(Mode::Image, content);

        assert_eq!(session.mode, Mode::Image);
        assert_eq!(session.image_url.as_deref(), Some("https://example.com/a.jpg"));
        assert_eq!(session.target_text(), "A city skyline at sunset.");
    }

    #[test]
    fn test_tick_during_typing_updates_wpm() {
        let mut session = ready_session("hello world");
        for c in "hello ".chars() {
            session.write(c);
        }

        std::thread::sleep(std::time::Duration::from_millis(30));
        session.on_tick();
        assert!(session.wpm > 0.0);
    }
}
