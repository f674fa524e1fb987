use std::time::Duration;

/// Position-by-position comparison of typed input against the target.
/// Returns `(correct, errors)`. A typed char past the end of the target
/// always counts as an error, so `correct + errors == typed.len()`.
pub fn compare(typed: &[char], target: &[char]) -> (usize, usize) {
    let correct = typed
        .iter()
        .enumerate()
        .filter(|&(idx, c)| target.get(idx) == Some(c))
        .count();

    (correct, typed.len() - correct)
}

/// Whitespace-delimited non-empty tokens.
pub fn word_count(input: &str) -> usize {
    input.split_whitespace().count()
}

/// Accuracy in percent: 100 on empty input, otherwise correct chars over
/// typed chars, rounded.
pub fn accuracy(correct: usize, typed_len: usize) -> f64 {
    if typed_len == 0 {
        return 100.0;
    }

    ((correct as f64 / typed_len as f64) * 100.0).round().max(0.0)
}

/// Words per minute over wall-clock elapsed time; 0 until any time has
/// actually passed.
pub fn words_per_minute(words: usize, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;

    if minutes > 0.0 {
        (words as f64 / minutes).round()
    } else {
        0.0
    }
}
