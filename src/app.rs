use std::time::Instant;

use crossterm::event::KeyEvent;
use rand::{rngs::StdRng, SeedableRng};

use crate::error::SessionError;
use crate::high_score::{HighScore, Submission};
use crate::input_gate::{self, KeyAction, Rejection};
use crate::metrics::Metrics;
use crate::session::{Accepted, Session};
use crate::store::KeyValueStore;

/// Whether the event loop should keep going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// How a finished race compares with the best on record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    New { previous: u32 },
    Matched,
    Below,
}

/// Summary kept for the race that just finished
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceResult {
    pub metrics: Metrics,
    pub record: Record,
}

impl RaceResult {
    pub fn is_new_record(&self) -> bool {
        matches!(self.record, Record::New { .. })
    }
}

/// The game: the live session, the persisted high score, and the store it
/// is written to.
///
/// The high score is loaded once on construction and only changes when a
/// session finishes.
#[derive(Debug)]
pub struct App<S: KeyValueStore> {
    session: Session,
    high_score: HighScore,
    store: S,
    rng: StdRng,
    last_result: Option<RaceResult>,
    pub show_high_score: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    pub fn with_rng(store: S, mut rng: StdRng) -> Self {
        let session = Session::random(&mut rng);
        Self::assemble(store, rng, session)
    }

    /// Starts on a caller-chosen target instead of a random one.
    pub fn with_target(store: S, target: impl Into<String>) -> Result<Self, SessionError> {
        let session = Session::new(target)?;
        Ok(Self::assemble(store, StdRng::from_entropy(), session))
    }

    fn assemble(store: S, rng: StdRng, session: Session) -> Self {
        let high_score = HighScore::load(&store);
        Self {
            session,
            high_score,
            store,
            rng,
            last_result: None,
            show_high_score: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn last_result(&self) -> Option<&RaceResult> {
        self.last_result.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the session with one over a new random sentence.
    pub fn new_text(&mut self) {
        let session = Session::random(&mut self.rng);
        self.replace_session(session);
    }

    /// Replaces the session with a fresh one over the same sentence.
    pub fn retry(&mut self) {
        let session = self.session.restarted();
        self.replace_session(session);
    }

    fn replace_session(&mut self, session: Session) {
        self.session = session;
        self.last_result = None;
        tracing::debug!(target_text = self.session.target(), "session reset");
    }

    /// Offers a full input value to the session and runs the finish
    /// transition when it completes the target.
    pub fn propose(&mut self, value: &str, now: Instant) -> Result<Accepted, Rejection> {
        let accepted = self.session.propose(value, now);
        self.after_proposal(accepted)
    }

    pub fn type_char(&mut self, c: char, now: Instant) -> Result<Accepted, Rejection> {
        let accepted = self.session.type_char(c, now);
        self.after_proposal(accepted)
    }

    pub fn paste(&mut self, text: &str, now: Instant) -> Result<Accepted, Rejection> {
        let accepted = self.session.paste(text, now);
        self.after_proposal(accepted)
    }

    fn after_proposal(
        &mut self,
        accepted: Result<Accepted, Rejection>,
    ) -> Result<Accepted, Rejection> {
        match accepted {
            Ok(a) => {
                if a.started {
                    tracing::info!(target_text = self.session.target(), "race started");
                }
                if a.finished {
                    self.finish();
                }
            }
            Err(rejection) => {
                tracing::debug!(%rejection, cursor = self.session.cursor(), "input rejected");
            }
        }
        accepted
    }

    fn finish(&mut self) {
        let metrics = self.session.metrics();
        let best_before = self.high_score.best();
        let (submission, written) = self.high_score.submit(metrics.wpm, &mut self.store);

        if let Err(err) = written {
            tracing::warn!(%err, "could not persist high score");
        }

        let record = match submission {
            Submission::NewRecord { previous } => {
                tracing::info!(wpm = metrics.wpm, previous, "new high score");
                Record::New { previous }
            }
            Submission::NotARecord if best_before > 0 && metrics.wpm == best_before => {
                Record::Matched
            }
            Submission::NotARecord => Record::Below,
        };

        tracing::info!(
            wpm = metrics.wpm,
            accuracy = metrics.accuracy,
            errors = metrics.errors,
            elapsed_secs = metrics.elapsed_secs,
            "race finished"
        );

        self.last_result = Some(RaceResult { metrics, record });
    }

    /// Routes a key press through the key gate.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        match input_gate::classify_key(key, self.session.status()) {
            KeyAction::Quit => return Control::Quit,
            KeyAction::NewText => self.new_text(),
            KeyAction::Retry => self.retry(),
            KeyAction::Type(c) => {
                let _ = self.type_char(c, now);
            }
            KeyAction::Suppressed => {
                tracing::trace!(code = ?key.code, "suppressed key");
            }
            KeyAction::Ignored => {}
        }
        Control::Continue
    }

    pub fn handle_paste(&mut self, text: &str, now: Instant) -> Control {
        let _ = self.paste(text, now);
        Control::Continue
    }
}
