use std::io::Write;

use anyhow::Result;
use tax_client::ProfileService;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::command::{Command, HELP};
use crate::logging;
use crate::screens;
use crate::session::{Screen, WizardSession};

/// Reads commands from `input` until `quit` or end of input, redrawing the
/// session to `out` after each one.
pub async fn run<S, R, W>(
    session: &mut WizardSession<S>,
    input: R,
    mut out: W,
) -> Result<()>
where
    S: ProfileService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    screens::draw(&mut out, session)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("input closed");
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "  ! {err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Fields => match session.screen() {
                Screen::Wizard => screens::field_list(&mut out, session, session.wizard().current())?,
                Screen::Welcome => writeln!(out, "  ! sign in with 'email <address>' first")?,
            },
            Command::Log(directive) => match logging::set_log_level(&directive) {
                Ok(()) => writeln!(out, "log filter set to '{directive}'")?,
                Err(err) => writeln!(out, "  ! {err}")?,
            },
            Command::Submit => {
                // Draw the loading state before the network round trip.
                if let Some(request) = session.begin_submit() {
                    screens::draw(&mut out, session)?;
                    session.finish_submit(request).await;
                }
                screens::draw(&mut out, session)?;
            }
            command => {
                for event in command.into_events() {
                    session.dispatch(event).await;
                    if session.notice().is_some() {
                        break;
                    }
                }
                screens::draw(&mut out, session)?;
            }
        }
    }

    writeln!(out, "Goodbye.")?;
    Ok(())
}
