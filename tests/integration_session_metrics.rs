use assert_matches::assert_matches;

use tipsum::app::{App, Settings};
use tipsum::content::{Content, FetchError, Mode};
use tipsum::session::{Phase, Session};

// End-to-end metric scenarios for a session driven directly, without the
// runtime in between.

#[test]
fn clean_run_has_zero_errors_at_every_step() {
    let mut session = Session::ready(Mode::Text, Content::text("cat"));

    for (c, expected_cursor) in [('c', 1), ('a', 2), ('t', 3)] {
        session.write(c);
        assert_eq!(session.error_count, 0);
        assert_eq!(session.cursor_pos(), expected_cursor);
    }

    assert_eq!(session.phase, Phase::Complete);
}

#[test]
fn one_wrong_char_costs_a_third_of_accuracy() {
    let mut session = Session::ready(Mode::Text, Content::text("cat"));
    for c in "cot".chars() {
        session.write(c);
    }

    assert_eq!(session.error_count, 1);
    assert_eq!(session.accuracy, 67.0);
}

#[test]
fn correct_plus_error_counts_always_cover_the_input() {
    // the partition is over the chars the session accepted: typing "cat"
    // completes and locks it, so anything after the exact match is
    // rejected rather than counted
    let inputs = ["", "c", "cot", "cat", "cats", "xatastrophe", "zzz"];
    for input in inputs {
        let mut session = Session::ready(Mode::Text, Content::text("cat"));
        for c in input.chars() {
            session.write(c);
        }
        assert_eq!(
            session.correct_count + session.error_count,
            session.cursor_pos(),
            "input {:?}",
            input
        );
        assert!((0.0..=100.0).contains(&session.accuracy));
    }
}

#[test]
fn reset_restores_initial_metric_display() {
    let mut app = App::new(Mode::Text, Settings::default());
    let ticket = app.begin_fetch();
    app.apply_fetch(ticket.generation, Ok(Content::text("cat")));

    for c in "cxx".chars() {
        app.write(c);
    }
    assert!(app.session.error_count > 0);

    app.restart();

    assert_eq!(app.session.wpm, 0.0);
    assert_eq!(app.session.accuracy, 100.0);
    assert_eq!(app.session.error_count, 0);
    assert!(!app.session.has_started());
}

#[test]
fn fetch_failure_keeps_input_disabled_until_restart() {
    let mut app = App::new(Mode::Image, Settings::default());
    let ticket = app.begin_fetch();

    app.apply_fetch(ticket.generation, Err(FetchError::EmptyBody));
    assert_matches!(app.session.phase, Phase::Error);
    assert!(!app.session.accepts_input());

    let retry = app.restart();
    assert_eq!(retry.mode, Mode::Image);
    assert_matches!(app.session.phase, Phase::Loading);
}

#[test]
fn wpm_counts_whitespace_delimited_words() {
    let mut session = Session::ready(Mode::Text, Content::text("ab  cd  ef"));
    for c in "ab  cd ".chars() {
        session.write(c);
    }

    std::thread::sleep(std::time::Duration::from_millis(30));
    session.on_tick();

    // "ab  cd " is two words; with ~30ms elapsed that is a large but
    // finite wpm
    assert!(session.wpm > 0.0);
}
