//! Plays one pinned sentence to the end in a pseudo terminal and checks that
//! the score file was written. Unix only and `#[ignore]`d since it needs a
//! pty; `cargo test --test integration_min_session -- --ignored` runs it.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_race_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = dir.path().join("scores.json");

    let bin = assert_cmd::cargo::cargo_bin("typeracer");
    let cmd = format!("{} --sentence 0 --store {}", bin.display(), store.display());

    let mut p = spawn(cmd)?;

    // alternate screen and raw mode need a moment
    std::thread::sleep(Duration::from_millis(200));

    p.send("The quick brown fox jumps over the lazy dog.")?;

    std::thread::sleep(Duration::from_millis(200));

    // typing is disabled once finished, so 'q' quits
    p.send("q")?;

    p.expect(Eof)?;

    assert!(store.exists(), "a finished race should record a high score");
    Ok(())
}
