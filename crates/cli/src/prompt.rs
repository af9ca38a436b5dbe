//! Interactive API key entry.
//!
//! Keys are read in raw mode so nothing is echoed except a `*` per
//! character. Entered keys only live in the session's credential store.

use color_eyre::eyre::{bail, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use rk_core::providers::kind::normalize_name;
use rk_core::providers::ProviderKind;
use rk_core::session::ReviewSession;
use std::io::{stdin, stdout, IsTerminal, Write};

/// Restores cooked mode when dropped, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// What a key press does to the line being typed.
#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Push(char),
    Pop,
    Submit,
    Cancel,
    Ignore,
}

fn key_action(key: &KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Esc => KeyAction::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Cancel,
        KeyCode::Backspace => KeyAction::Pop,
        KeyCode::Char(c) => KeyAction::Push(c),
        _ => KeyAction::Ignore,
    }
}

/// Read one line without echoing it.
fn read_masked(label: &str) -> Result<String> {
    let mut out = stdout();
    write!(out, "Enter {label} API key: ")?;
    out.flush()?;

    let mut value = String::new();
    {
        let _guard = RawModeGuard::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match key_action(&key) {
                KeyAction::Push(c) => {
                    value.push(c);
                    write!(out, "*")?;
                }
                KeyAction::Pop => {
                    if value.pop().is_some() {
                        write!(out, "\u{8} \u{8}")?;
                    }
                }
                KeyAction::Submit => break,
                KeyAction::Cancel => {
                    write!(out, "\r\n")?;
                    bail!("API key entry cancelled");
                }
                KeyAction::Ignore => {}
            }
            out.flush()?;
        }
    }
    writeln!(out)?;
    Ok(value)
}

/// Ask for keys of hosted providers in `providers` that have none.
///
/// Does nothing when stdin is not a terminal; the router then reports the
/// missing credential when the call is made.
pub fn ensure_credentials<'a>(
    session: &mut ReviewSession,
    providers: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    if !stdin().is_terminal() {
        return Ok(());
    }

    let mut asked: Vec<String> = Vec::new();
    for provider in providers {
        let name = normalize_name(provider);
        let Some(kind) = ProviderKind::from_name(&name) else {
            continue;
        };
        if asked.contains(&name) || session.credentials.get(&name).is_some() {
            continue;
        }

        let key = read_masked(kind.label())?;
        session.credentials.set(&name, key);
        asked.push(name);
    }
    Ok(())
}
