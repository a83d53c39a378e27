use std::{
    io::{self, stdin},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use typeracer::{
    app::App,
    config::{ConfigStore, FileConfigStore},
    high_score::{HighScore, HIGH_SCORE_KEY},
    logging,
    runtime::{self, CrosstermEventSource, Runner},
    sentences::SENTENCES,
    store::{FileStore, KeyValueStore, MemoryStore},
};

/// forward-only typing race with live wpm and a persisted high score
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Race through a sentence as fast and accurately as you can. Mistakes stay on the page: backspace, delete and the arrow keys are disabled."
)]
pub struct Cli {
    /// race against the sentence at this index (0-9) instead of a random one
    #[clap(long, value_parser = parse_sentence_index)]
    sentence: Option<usize>,

    /// path of the high score file
    #[clap(long)]
    store: Option<PathBuf>,

    /// do not write a new high score back to disk
    #[clap(long)]
    no_save: bool,

    /// hide the high score panel
    #[clap(long)]
    hide_high_score: bool,

    /// print the stored high score and exit
    #[clap(long, conflicts_with = "reset_high_score")]
    print_high_score: bool,

    /// reset the stored high score to 0 and exit
    #[clap(long)]
    reset_high_score: bool,

    /// write logs to this file (filter with RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn parse_sentence_index(s: &str) -> Result<usize, String> {
    let idx: usize = s.parse().map_err(|err: std::num::ParseIntError| err.to_string())?;
    if idx >= SENTENCES.len() {
        return Err(format!("must be below {}", SENTENCES.len()));
    }
    Ok(idx)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = FileConfigStore::new().load();

    if let Some(log_file) = cli.log_file.as_ref().or(config.log_file.as_ref()) {
        logging::init_file_logging(log_file)
            .with_context(|| format!("opening log file {}", log_file.display()))?;
    }

    let mut file_store = cli
        .store
        .clone()
        .or(config.store_path.clone())
        .map(FileStore::with_path)
        .unwrap_or_default();

    if cli.print_high_score {
        println!("{}", HighScore::load(&file_store).best());
        return Ok(());
    }

    if cli.reset_high_score {
        HighScore::load(&file_store)
            .reset(&mut file_store)
            .context("resetting high score")?;
        println!("high score reset ({})", file_store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store: Box<dyn KeyValueStore> = if cli.no_save {
        let best = HighScore::load(&file_store).best();
        Box::new(MemoryStore::with_entry(HIGH_SCORE_KEY, &best.to_string()))
    } else {
        Box::new(file_store)
    };

    let mut app = match cli.sentence {
        Some(idx) => App::with_target(store, SENTENCES[idx])?,
        None => App::new(store),
    };
    app.show_high_score = config.show_high_score && !cli.hide_high_score;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let result = runtime::drive(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result.context("running race")?;
    tracing::info!(high_score = app.high_score(), "exiting");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["typeracer"]).unwrap();
        assert_eq!(cli.sentence, None);
        assert_eq!(cli.store, None);
        assert!(!cli.no_save);
        assert!(!cli.print_high_score);
        assert!(!cli.reset_high_score);
    }

    #[test]
    fn cli_flags() {
        let cli = Cli::try_parse_from([
            "typeracer",
            "--sentence",
            "3",
            "--store",
            "/tmp/scores.json",
            "--no-save",
            "--hide-high-score",
        ])
        .unwrap();
        assert_eq!(cli.sentence, Some(3));
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/scores.json")));
        assert!(cli.no_save);
        assert!(cli.hide_high_score);
    }

    #[test]
    fn sentence_index_is_bounded_by_pool() {
        let last = (SENTENCES.len() - 1).to_string();
        let cli = Cli::try_parse_from(["typeracer", "--sentence", last.as_str()]).unwrap();
        assert_eq!(cli.sentence, Some(SENTENCES.len() - 1));

        let past_end = SENTENCES.len().to_string();
        for bad in [past_end.as_str(), "three"] {
            let err = Cli::try_parse_from(["typeracer", "--sentence", bad]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{bad}");
        }
    }

    #[test]
    fn print_and_reset_conflict() {
        let err = Cli::try_parse_from(["typeracer", "--print-high-score", "--reset-high-score"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
