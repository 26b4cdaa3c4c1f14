pub mod command;
pub mod config;
pub mod logging;
pub mod screens;
pub mod session;
pub mod terminal;

pub use command::{Command, CommandError};
pub use config::{AppConfig, ConfigError, LogConfig};
pub use session::{Notice, Screen, UiEvent, WizardSession};
