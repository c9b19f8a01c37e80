// Drives the compiled binary through a PTY so the real event loop and
// crossterm input handling are exercised.
//
// Requires a TTY; expectrl allocates a pseudo terminal. Unix-only and
// ignored by default. Run with:
// `cargo test --test integration_min_session -- --ignored`

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_quiz_session_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("mashq");
    let cmd = format!("{} -q -c colors --seed 1", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // answer the first question, move on, then leave and quit
    p.send("1")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}
