use std::time::Instant;

use rand::Rng;

use crate::error::SessionError;
use crate::input_gate::{self, Rejection};
use crate::metrics::{self, Metrics};
use crate::sentences;

/// Lifecycle of a single race
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Status {
    #[strum(serialize = "not started")]
    NotStarted,
    #[strum(serialize = "running")]
    Running,
    #[strum(serialize = "finished")]
    Finished,
}

/// Effect of an accepted proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    /// this proposal started the clock
    pub started: bool,
    /// this proposal completed the target
    pub finished: bool,
}

/// One race against a fixed target text.
///
/// Typed text only ever grows, and the session finishes exactly when it
/// equals the target. A finished session is never reused; callers build a
/// new one to race again.
#[derive(Debug, Clone)]
pub struct Session {
    target: String,
    typed: String,
    started_at: Option<Instant>,
    status: Status,
    metrics: Metrics,
}

impl Session {
    pub fn new(target: impl Into<String>) -> Result<Self, SessionError> {
        let target = target.into();
        if target.is_empty() {
            return Err(SessionError::EmptyTarget);
        }
        Ok(Self::fresh(target))
    }

    /// A session over a sentence picked at random from the fixed pool.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::fresh(sentences::random_sentence(rng).to_string())
    }

    /// A session over the pool sentence at `index`, if there is one.
    pub fn from_sentence_index(index: usize) -> Option<Self> {
        sentences::sentence_at(index).map(|s| Self::fresh(s.to_string()))
    }

    /// A brand new session over the same target.
    pub fn restarted(&self) -> Self {
        Self::fresh(self.target.clone())
    }

    fn fresh(target: String) -> Self {
        Self {
            target,
            typed: String::new(),
            started_at: None,
            status: Status::NotStarted,
            metrics: Metrics::default(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn has_started(&self) -> bool {
        self.status != Status::NotStarted
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// Index of the next char to type, in chars.
    pub fn cursor(&self) -> usize {
        self.typed.chars().count()
    }

    pub fn target_len(&self) -> usize {
        self.target.chars().count()
    }

    /// Seconds since the first accepted keystroke, or 0 before it.
    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        self.started_at
            .map(|started| now.saturating_duration_since(started).as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Offers a new full input value.
    ///
    /// On acceptance the typed text is replaced, the clock starts if this is
    /// the first accepted non-empty value, metrics are recomputed and the
    /// finish check runs. A rejection leaves the session untouched, and so
    /// does an empty value before the start.
    pub fn propose(&mut self, value: &str, now: Instant) -> Result<Accepted, Rejection> {
        input_gate::check(value, &self.typed, &self.target, self.status)?;

        if self.status == Status::NotStarted && value.is_empty() {
            return Ok(Accepted {
                started: false,
                finished: false,
            });
        }

        let started = self.status == Status::NotStarted;
        if started {
            self.started_at = Some(now);
            self.status = Status::Running;
        }

        self.typed.clear();
        self.typed.push_str(value);
        self.metrics = metrics::compute(&self.typed, &self.target, self.elapsed_secs(now));

        let finished = self.typed == self.target;
        if finished {
            self.status = Status::Finished;
        }

        Ok(Accepted { started, finished })
    }

    /// Appends one char, as a keystroke on the input surface would.
    pub fn type_char(&mut self, c: char, now: Instant) -> Result<Accepted, Rejection> {
        let mut value = String::with_capacity(self.typed.len() + c.len_utf8());
        value.push_str(&self.typed);
        value.push(c);
        self.propose(&value, now)
    }

    /// Appends pasted text in one proposal. Pastes that would run past the
    /// target are rejected whole.
    pub fn paste(&mut self, text: &str, now: Instant) -> Result<Accepted, Rejection> {
        let value = format!("{}{}", self.typed, text);
        self.propose(&value, now)
    }
}
