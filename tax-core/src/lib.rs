pub mod email;
pub mod form;
pub mod models;
pub mod render;
pub mod utils;
pub mod wizard;

pub use email::{EmailAddress, InvalidEmail};
pub use models::*;
pub use render::{ResultsPanel, ResultsView, render};
pub use wizard::{ProgressMark, Step, StepView, WizardAction, WizardState};
