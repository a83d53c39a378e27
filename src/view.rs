use crate::app::{App, RaceResult};
use crate::metrics::Metrics;
use crate::session::{Session, Status};
use crate::store::KeyValueStore;

/// Visual class of one target char
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Pending,
    Correct,
    Error,
    Current,
}

/// Everything the terminal needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub chars: Vec<(char, CharClass)>,
    /// the text actually typed, shown under the target
    pub typed: String,
    pub status: Status,
    pub metrics: Metrics,
    pub high_score: Option<u32>,
    pub result: Option<RaceResult>,
    pub placeholder: Option<&'static str>,
}

pub const PLACEHOLDER: &str = "Start typing to begin...";

/// Classifies each target char against what was typed.
///
/// Typed positions are correct or error; the first untyped position is
/// current; everything after is pending.
pub fn classify(session: &Session) -> Vec<(char, CharClass)> {
    let mut typed = session.typed().chars();
    let cursor = session.cursor();

    session
        .target()
        .chars()
        .enumerate()
        .map(|(idx, expected)| {
            let class = match typed.next() {
                Some(c) if c == expected => CharClass::Correct,
                Some(_) => CharClass::Error,
                None if idx == cursor => CharClass::Current,
                None => CharClass::Pending,
            };
            (expected, class)
        })
        .collect()
}

/// Derives the frame's view model from app state. Pure: the same state
/// always yields the same model.
pub fn render<S: KeyValueStore>(app: &App<S>) -> ViewModel {
    let session = app.session();

    ViewModel {
        chars: classify(session),
        typed: session.typed().to_string(),
        status: session.status(),
        metrics: session.metrics(),
        high_score: app.show_high_score.then(|| app.high_score()),
        result: app.last_result().copied(),
        placeholder: (!session.has_started()).then_some(PLACEHOLDER),
    }
}
