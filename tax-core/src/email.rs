//! Email identifiers.
//!
//! The email string is the only key a profile has. It is checked against a
//! deliberately loose `something@something.something` shape before any request
//! leaves the client; the service does its own validation.

use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is a valid regex"))
}

/// Error returned when a string does not look like an email address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid email address '{input}'")]
pub struct InvalidEmail {
    input: String,
}

impl InvalidEmail {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A trimmed email string that passed [`EmailAddress::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trims `input` and checks it against `^\S+@\S+\.\S+$`.
    pub fn parse(input: &str) -> Result<Self, InvalidEmail> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && email_pattern().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(InvalidEmail {
                input: input.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = InvalidEmail;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}
