/// Live statistics for a typing session.
///
/// Always derived from `(typed, target, elapsed)` through [`compute`]; never
/// edited field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: usize,
    pub elapsed_secs: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            errors: 0,
            elapsed_secs: 0.0,
        }
    }
}

/// Number of whitespace-delimited words in `typed`. Blank input counts as zero.
pub fn words_typed(typed: &str) -> usize {
    typed.split_whitespace().count()
}

/// Positions where `typed` differs from `target`, compared char by char.
/// A typed char with no counterpart in `target` is an error.
pub fn count_errors(typed: &str, target: &str) -> usize {
    let mut expected = target.chars();
    typed
        .chars()
        .filter(|&c| expected.next() != Some(c))
        .count()
}

/// Computes wpm, accuracy and errors for the text typed so far.
///
/// Wpm is not clamped: a few words over a fraction of a second produce a
/// large value, which settles as the session goes on.
pub fn compute(typed: &str, target: &str, elapsed_secs: f64) -> Metrics {
    let elapsed_secs = elapsed_secs.max(0.0);

    let wpm = if elapsed_secs > 0.0 {
        (words_typed(typed) as f64 / elapsed_secs * 60.0).round() as u32
    } else {
        0
    };

    let typed_len = typed.chars().count();
    let errors = count_errors(typed, target);

    let accuracy = if typed_len > 0 {
        (((typed_len - errors) as f64 / typed_len as f64) * 100.0).round() as u32
    } else {
        100
    };

    Metrics {
        wpm,
        accuracy,
        errors,
        elapsed_secs,
    }
}
