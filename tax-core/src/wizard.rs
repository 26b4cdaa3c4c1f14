//! Wizard step state machine.
//!
//! The wizard has three intake steps followed by a results step. Navigation is
//! linear (one step at a time) except for submission, which always lands on
//! the results step.
//!
//! | from \ action | `Next` | `Prev` | `Submit` |
//! |---------------|--------|--------|----------|
//! | 1             | 2      | 1      | 4        |
//! | 2             | 3      | 1      | 4        |
//! | 3             | 4      | 2      | 4        |
//! | 4             | 4      | 3      | 4        |
//!
//! Every transition produces a [`StepView`]: which step is visible and how each
//! progress marker should be drawn.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four wizard steps, numbered 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    Personal = 1,
    Income = 2,
    Deductions = 3,
    Results = 4,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Personal, Step::Income, Step::Deductions, Step::Results];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Personal),
            2 => Some(Self::Income),
            3 => Some(Self::Deductions),
            4 => Some(Self::Results),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Personal => "Profile",
            Self::Income => "Income",
            Self::Deductions => "Deductions",
            Self::Results => "Results",
        }
    }

    fn following(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn preceding(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Navigation inputs understood by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Prev,
    /// "Go to results"; not bound by the one-step rule.
    Submit,
}

/// Current position in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    current: Step,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// A wizard positioned on the first intake step.
    pub fn new() -> Self {
        Self {
            current: Step::Personal,
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    pub fn next(self) -> Transition {
        transition(self, WizardAction::Next)
    }

    pub fn prev(self) -> Transition {
        transition(self, WizardAction::Prev)
    }

    pub fn submit(self) -> Transition {
        transition(self, WizardAction::Submit)
    }

    /// Back to step 1, as when the user starts over.
    pub fn restart(self) -> Self {
        Self::new()
    }

    /// The entry view for the current step.
    pub fn view(&self) -> StepView {
        StepView::for_step(self.current)
    }
}

/// Result of applying a [`WizardAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: WizardState,
    /// False when the action was a no-op (e.g. `Next` on the last step).
    pub changed: bool,
}

impl Transition {
    pub fn view(&self) -> StepView {
        self.state.view()
    }
}

/// Applies `action` to `state`.
pub fn transition(
    state: WizardState,
    action: WizardAction,
) -> Transition {
    let target = match action {
        WizardAction::Next => state.current.following(),
        WizardAction::Prev => state.current.preceding(),
        WizardAction::Submit => Some(Step::Results),
    };

    match target {
        Some(step) => Transition {
            state: WizardState { current: step },
            changed: step != state.current,
        },
        None => Transition {
            state,
            changed: false,
        },
    }
}

/// How a single progress marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressMark {
    Completed,
    Active,
    Pending,
}

/// What the host UI should show after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepView {
    pub visible: Step,
    /// One marker per step, in step order.
    pub progress: [(Step, ProgressMark); 4],
}

impl StepView {
    pub fn for_step(visible: Step) -> Self {
        let progress = Step::ALL.map(|step| {
            let mark = match step.cmp(&visible) {
                std::cmp::Ordering::Less => ProgressMark::Completed,
                std::cmp::Ordering::Equal => ProgressMark::Active,
                std::cmp::Ordering::Greater => ProgressMark::Pending,
            };
            (step, mark)
        });
        Self { visible, progress }
    }

    pub fn mark(
        &self,
        step: Step,
    ) -> ProgressMark {
        self.progress[usize::from(step.number() - 1)].1
    }
}

impl fmt::Display for StepView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let markers = self
            .progress
            .iter()
            .map(|(step, mark)| {
                let glyph = match mark {
                    ProgressMark::Completed => "✓",
                    ProgressMark::Active => "●",
                    ProgressMark::Pending => " ",
                };
                format!("[{glyph}] {step}")
            })
            .collect::<Vec<_>>()
            .join("  ");
        f.write_str(&markers)
    }
}
