//! Line-oriented driver for a [`Session`]: each input line is one action.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use recur_core::{Action, Session};

/// What a single line of input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Act(Vec<Action>),
    Quit,
}

fn parse_line(line: &str) -> Command {
    match line.trim() {
        "quit" | "exit" | ":quit" | ":q" => Command::Quit,
        "reset" | ":reset" => Command::Act(vec![Action::Reset]),
        _ => Command::Act(vec![Action::Edit(line.to_string()), Action::Solve]),
    }
}

/// Drive a session until `quit` or end of input, returning the final state.
///
/// `prompt` is written before every read when present.
pub fn run<R: BufRead, W: Write>(
    mut reader: R,
    mut out: W,
    prompt: Option<&str>,
) -> Result<Session> {
    let mut session = Session::new();
    let mut line = String::new();

    loop {
        if let Some(p) = prompt {
            write!(out, "{p}")?;
            out.flush()?;
        }

        line.clear();
        let read = reader.read_line(&mut line).context("failed to read input")?;
        if read == 0 {
            tracing::debug!("end of input");
            break;
        }
        let text = line.trim_end_matches(['\n', '\r']);

        let actions = match parse_line(text) {
            Command::Quit => break,
            Command::Act(actions) => actions,
        };
        for action in actions {
            tracing::debug!(?action, "applying");
            session = session.apply(action);
        }
        render(&session, &mut out)?;
    }

    Ok(session)
}

fn render<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    if !session.error.is_empty() {
        writeln!(out, "error: {}", session.error)?;
    } else if !session.solution.is_empty() {
        writeln!(out, "{}", session.solution)?;
    } else if session.is_empty() {
        writeln!(out, "(cleared)")?;
    }
    Ok(())
}
