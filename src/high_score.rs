use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Store key holding the best wpm as a decimal string
pub const HIGH_SCORE_KEY: &str = "typeRacerHighScore";

/// Parses a stored high score. Absent, malformed or negative values read as 0.
pub fn parse_high_score(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };

    match raw.trim().parse::<u32>() {
        Ok(wpm) => wpm,
        Err(err) => {
            tracing::warn!(raw, %err, "stored high score is not a valid wpm, using 0");
            0
        }
    }
}

/// Best wpm ever recorded on this profile.
///
/// Loaded once at startup and raised only by [`HighScore::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u32,
}

/// Result of offering a finished race's wpm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// beat the previous best, which is returned
    NewRecord { previous: u32 },
    NotARecord,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let best = parse_high_score(store.get(HIGH_SCORE_KEY).as_deref());
        tracing::info!(best, "high score loaded");
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Raises the best when `wpm` beats it and writes it through to `store`.
    ///
    /// The in-memory value is raised even if the write fails; the error is
    /// returned alongside so the caller can report it.
    pub fn submit<S: KeyValueStore + ?Sized>(
        &mut self,
        wpm: u32,
        store: &mut S,
    ) -> (Submission, Result<(), StoreError>) {
        if wpm <= self.best {
            return (Submission::NotARecord, Ok(()));
        }

        let previous = self.best;
        self.best = wpm;
        let written = store.set(HIGH_SCORE_KEY, &wpm.to_string());
        (Submission::NewRecord { previous }, written)
    }

    /// Overwrites the stored value with 0, for `--reset-high-score`.
    pub fn reset<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<(), StoreError> {
        self.best = 0;
        store.set(HIGH_SCORE_KEY, "0")
    }
}
