use std::str::FromStr;

use thiserror::Error;

use crate::session::UiEvent;

/// One line typed at the `tax-wizard` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `email <addr>`: set the login email and continue.
    Email(String),
    Continue,
    Confirm(String),
    Next,
    Prev,
    Set { field: String, value: String },
    Fields,
    Submit,
    Restart,
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  email <address>       sign in with your email and open the wizard
  continue              retry opening the wizard with the current email
  confirm <address>     change the email your return is saved under
  next, prev            move between steps (also: n, p, back)
  set <field> <value>   fill in a field; amounts accept commas (1,50,000)
  fields                list the fields of the current step
  submit                save your details and calculate your tax
  restart               clear everything and start over
  log <level>           change the log filter (error, warn, info, debug)
  help                  show this list
  quit                  leave (also: exit, q)";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "email" => Self::Email(required(rest, "email <address>")?),
            "continue" | "c" => Self::Continue,
            "confirm" => Self::Confirm(required(rest, "confirm <address>")?),
            "next" | "n" => Self::Next,
            "prev" | "p" | "back" => Self::Prev,
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage("set <field> <value>"))?;
                Self::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "fields" | "ls" => Self::Fields,
            "submit" => Self::Submit,
            "restart" => Self::Restart,
            "log" => Self::Log(required(rest, "log <level>")?),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}

fn required(
    rest: &str,
    usage: &'static str,
) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(rest.to_string())
    }
}

impl Command {
    /// The session events this command stands for. Commands handled by the
    /// terminal itself map to nothing.
    pub fn into_events(self) -> Vec<UiEvent> {
        match self {
            Self::Email(email) => vec![UiEvent::SetLoginEmail(email), UiEvent::Continue],
            Self::Continue => vec![UiEvent::Continue],
            Self::Confirm(email) => vec![UiEvent::SetConfirmedEmail(email)],
            Self::Next => vec![UiEvent::Next],
            Self::Prev => vec![UiEvent::Prev],
            Self::Set { field, value } => vec![UiEvent::Edit { field, value }],
            Self::Submit => vec![UiEvent::Submit],
            Self::Restart => vec![UiEvent::Restart],
            Self::Fields | Self::Log(_) | Self::Help | Self::Quit => Vec::new(),
        }
    }
}
