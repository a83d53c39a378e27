use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::app::{App, Control};
use crate::store::KeyValueStore;
use crate::view;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RaceEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
}

/// Source of terminal events (keyboard, paste, resize).
///
/// There is no timer: the race clock is read when input arrives, so the
/// loop only wakes up for real events.
pub trait RaceEventSource: Send + 'static {
    /// Block until the next event. `None` once the source is exhausted.
    fn recv(&self) -> Option<RaceEvent>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<RaceEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    Some(RaceEvent::Key(key))
                }
                Ok(CtEvent::Paste(text)) => Some(RaceEvent::Paste(text)),
                Ok(CtEvent::Resize(_, _)) => Some(RaceEvent::Resize),
                Ok(_) => None,
                Err(err) => {
                    tracing::error!(%err, "terminal event stream failed");
                    break;
                }
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceEventSource for CrosstermEventSource {
    fn recv(&self) -> Option<RaceEvent> {
        self.rx.recv().ok()
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<RaceEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<RaceEvent>) -> Self {
        Self { rx }
    }
}

impl RaceEventSource for TestEventSource {
    fn recv(&self) -> Option<RaceEvent> {
        self.rx.recv().ok()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: RaceEventSource> {
    event_source: E,
}

impl<E: RaceEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks for the next event; `None` means the source has closed.
    pub fn step(&self) -> Option<RaceEvent> {
        self.event_source.recv()
    }
}

impl<E: RaceEventSource> Iterator for Runner<E> {
    type Item = RaceEvent;

    fn next(&mut self) -> Option<RaceEvent> {
        self.step()
    }
}

/// Draws the app, then feeds it events until it asks to quit or the
/// source closes. Every event is stamped with the time it was handled.
pub fn drive<B: Backend, S: KeyValueStore, E: RaceEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    runner: &Runner<E>,
) -> io::Result<()> {
    draw(terminal, app)?;

    while let Some(event) = runner.step() {
        let now = Instant::now();
        let control = match event {
            RaceEvent::Key(key) => app.handle_key(key, now),
            RaceEvent::Paste(text) => app.handle_paste(&text, now),
            RaceEvent::Resize => Control::Continue,
        };

        if control == Control::Quit {
            break;
        }
        draw(terminal, app)?;
    }

    Ok(())
}

fn draw<B: Backend, S: KeyValueStore>(terminal: &mut Terminal<B>, app: &App<S>) -> io::Result<()> {
    let vm = view::render(app);
    terminal.draw(|f| f.render_widget(&vm, f.area()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;

    #[test]
    fn step_returns_none_when_source_closes() {
        let (tx, rx) = mpsc::channel::<RaceEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));

        assert_eq!(runner.step(), None);
    }

    #[test]
    fn step_passes_through_events_in_order() {
        let (tx, rx) = mpsc::channel();
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        tx.send(RaceEvent::Resize).unwrap();
        tx.send(RaceEvent::Key(key)).unwrap();
        tx.send(RaceEvent::Paste("bc".into())).unwrap();
        drop(tx);

        let events: Vec<RaceEvent> = Runner::new(TestEventSource::new(rx)).collect();

        assert_eq!(
            events,
            vec![
                RaceEvent::Resize,
                RaceEvent::Key(key),
                RaceEvent::Paste("bc".into())
            ]
        );
    }

    #[test]
    fn drive_stops_on_quit_key() {
        let (tx, rx) = mpsc::channel();
        tx.send(RaceEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)))
            .unwrap();
        tx.send(RaceEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        // never reached: the loop exits on Esc
        tx.send(RaceEvent::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)))
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::with_target(MemoryStore::new(), "cat").unwrap();
        let runner = Runner::new(TestEventSource::new(rx));

        drive(&mut terminal, &mut app, &runner).unwrap();

        assert_eq!(app.session().typed(), "c");
    }

    #[test]
    fn drive_ends_when_source_closes() {
        let (tx, rx) = mpsc::channel();
        tx.send(RaceEvent::Paste("ca".into())).unwrap();
        tx.send(RaceEvent::Resize).unwrap();
        drop(tx);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::with_target(MemoryStore::new(), "cat").unwrap();
        let runner = Runner::new(TestEventSource::new(rx));

        drive(&mut terminal, &mut app, &runner).unwrap();

        assert_eq!(app.session().typed(), "ca");
    }
}
