//! Input-event dispatcher for the tax wizard.
//!
//! A [`WizardSession`] owns all state a host UI needs: which screen is up,
//! the wizard step, the form widgets and the results area. Hosts translate
//! their input into [`UiEvent`]s and redraw from the accessors afterwards.

use tax_client::{ClientError, FetchOutcome, ProfileService};
use tax_core::form::{self, FormError, FormFields};
use tax_core::{EmailAddress, ResultsPanel, SaveProfileRequest, StepView, WizardState, render};
use tracing::{debug, error, info, warn};

pub const INVALID_LOGIN_EMAIL: &str = "Please enter a valid email address.";
pub const INVALID_CONFIRMED_EMAIL: &str = "Please confirm your email address.";
pub const CONNECTIVITY_ALERT: &str = "Could not connect to server.";

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Email prompt shown before the wizard.
    #[default]
    Welcome,
    Wizard,
}

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SetLoginEmail(String),
    /// Leave the welcome screen, loading any saved profile.
    Continue,
    /// Change the email the submission is filed under.
    SetConfirmedEmail(String),
    Next,
    Prev,
    Edit { field: String, value: String },
    Submit,
    Restart,
}

/// Feedback for the user about the last event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Shown next to the input that caused it.
    Inline(String),
    /// Must be acknowledged before continuing.
    Alert(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Inline(message) | Self::Alert(message) => message,
        }
    }
}

impl From<FormError> for Notice {
    fn from(err: FormError) -> Self {
        Self::Inline(err.to_string())
    }
}

/// State of one user's pass through the wizard.
pub struct WizardSession<S> {
    service: S,
    screen: Screen,
    wizard: WizardState,
    form: FormFields,
    login_email: String,
    confirmed_email: String,
    results: ResultsPanel,
    notice: Option<Notice>,
}

impl<S: ProfileService> WizardSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            screen: Screen::Welcome,
            wizard: WizardState::new(),
            form: FormFields::standard(),
            login_email: String::new(),
            confirmed_email: String::new(),
            results: ResultsPanel::Empty,
            notice: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn wizard(&self) -> WizardState {
        self.wizard
    }

    pub fn step_view(&self) -> StepView {
        self.wizard.view()
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn login_email(&self) -> &str {
        &self.login_email
    }

    pub fn confirmed_email(&self) -> &str {
        &self.confirmed_email
    }

    pub fn results(&self) -> &ResultsPanel {
        &self.results
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Handles one event to completion, network calls included.
    pub async fn dispatch(
        &mut self,
        event: UiEvent,
    ) {
        self.notice = None;
        debug!(?event, screen = ?self.screen, step = self.wizard.current().number(), "dispatch");

        match event {
            UiEvent::SetLoginEmail(email) => self.login_email = email,
            UiEvent::Continue => self.continue_to_wizard().await,
            UiEvent::SetConfirmedEmail(email) => self.confirmed_email = email,
            UiEvent::Next => self.navigate(WizardState::next),
            UiEvent::Prev => self.navigate(WizardState::prev),
            UiEvent::Edit { field, value } => self.edit(&field, &value),
            UiEvent::Submit => {
                if let Some(request) = self.begin_submit() {
                    self.finish_submit(request).await;
                }
            }
            UiEvent::Restart => self.restart(),
        }
    }

    async fn continue_to_wizard(&mut self) {
        if self.screen != Screen::Welcome {
            return;
        }
        let Ok(email) = EmailAddress::parse(&self.login_email) else {
            self.notice = Some(Notice::Inline(INVALID_LOGIN_EMAIL.to_string()));
            return;
        };

        match self.service.fetch_profile(&email).await {
            Ok(FetchOutcome::Found(profile)) => {
                info!(%email, "loaded saved profile");
                form::populate(&mut self.form, &profile);
            }
            Ok(FetchOutcome::NotFound) => self.form.reset(),
            Err(err) => {
                warn!(%email, error = %err, "could not load profile");
                self.notice = Some(Notice::Alert(fetch_alert(&err)));
            }
        }

        self.confirmed_email = email.to_string();
        self.screen = Screen::Wizard;
        self.wizard = WizardState::new();
    }

    fn navigate(
        &mut self,
        step: fn(WizardState) -> tax_core::wizard::Transition,
    ) {
        if self.screen != Screen::Wizard {
            return;
        }
        let transition = step(self.wizard);
        if transition.changed {
            self.wizard = transition.state;
        }
    }

    fn edit(
        &mut self,
        field: &str,
        value: &str,
    ) {
        if self.screen != Screen::Wizard {
            return;
        }
        if let Err(err) = self.form.edit(field, value) {
            self.notice = Some(err.into());
        }
    }

    /// First half of a submission: validates the confirmed email, shows the
    /// results step in its loading state and extracts the payload.
    ///
    /// Returns `None` when nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<SaveProfileRequest> {
        self.notice = None;
        if self.screen != Screen::Wizard {
            return None;
        }
        let Ok(email) = EmailAddress::parse(&self.confirmed_email) else {
            self.notice = Some(Notice::Inline(INVALID_CONFIRMED_EMAIL.to_string()));
            return None;
        };

        self.results = ResultsPanel::Loading;
        self.wizard = self.wizard.submit().state;
        Some(SaveProfileRequest::new(email, form::extract(&self.form)))
    }

    /// Second half of a submission: saves, calculates and fills the results
    /// area with either the rendered outcome or the error.
    pub async fn finish_submit(
        &mut self,
        request: SaveProfileRequest,
    ) {
        self.results = match self.service.save_and_calculate(&request).await {
            Ok(result) => ResultsPanel::Ready(Box::new(render(&result))),
            Err(err) => {
                error!(email = %request.email, error = %err, "submission failed");
                ResultsPanel::Failed(format!(
                    "An error occurred: {err}. Please check logs for details."
                ))
            }
        };
    }

    fn restart(&mut self) {
        self.form.reset();
        self.login_email.clear();
        self.confirmed_email.clear();
        self.results = ResultsPanel::Empty;
        self.wizard = self.wizard.restart();
        self.screen = Screen::Welcome;
    }
}

fn fetch_alert(err: &ClientError) -> String {
    if err.is_connectivity() {
        CONNECTIVITY_ALERT.to_string()
    } else {
        format!("Could not load your profile: {err}.")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::form::WidgetValue;
    use tax_core::models::{Advice, CalculationResult, Profile, SaveAck, TaxSnapshot};
    use tax_core::render::SavingsBadge;
    use tax_core::{EmailAddress, Step};

    use super::*;

    // ── stub service ─────────────────────────────────────────────────────
    // Canned answers per operation; every call is recorded so tests can
    // check what reached the "network".
    enum Fetch {
        Found(Profile),
        NotFound,
        Status(u16),
    }

    struct StubService {
        fetch: Fetch,
        save_status: Option<u16>,
        calculation: Result<CalculationResult, u16>,
        calls: Mutex<Vec<String>>,
    }

    impl StubService {
        fn new() -> Self {
            Self {
                fetch: Fetch::NotFound,
                save_status: None,
                calculation: Ok(sample_result(dec!(20800))),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(
            &self,
            call: String,
        ) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ProfileService for StubService {
        async fn fetch_profile(
            &self,
            email: &EmailAddress,
        ) -> Result<FetchOutcome, ClientError> {
            self.record(format!("fetch {email}"));
            match &self.fetch {
                Fetch::Found(profile) => Ok(FetchOutcome::Found(profile.clone())),
                Fetch::NotFound => Ok(FetchOutcome::NotFound),
                Fetch::Status(status) => Err(ClientError::FetchFailed { status: *status }),
            }
        }

        async fn save_profile(
            &self,
            request: &SaveProfileRequest,
        ) -> Result<SaveAck, ClientError> {
            self.record(format!(
                "save {} 80c={}",
                request.email, request.profile_data.deductions.section_80c
            ));
            match self.save_status {
                None => Ok(SaveAck {
                    status: 201,
                    user_id: Some(1),
                }),
                Some(status) => Err(ClientError::SaveFailed { status }),
            }
        }

        async fn request_calculation(
            &self,
            email: &EmailAddress,
        ) -> Result<CalculationResult, ClientError> {
            self.record(format!("calculate {email}"));
            self.calculation
                .clone()
                .map_err(|status| ClientError::CalculationFailed { status })
        }
    }

    fn sample_result(savings: rust_decimal::Decimal) -> CalculationResult {
        CalculationResult {
            summary: "You can save **more**".into(),
            current_tax: TaxSnapshot {
                gti: dec!(1200000),
                taxable_income: dec!(1000000),
                total_tax: dec!(117000),
            },
            potential_tax: TaxSnapshot {
                gti: dec!(1200000),
                taxable_income: dec!(900000),
                total_tax: dec!(96200),
            },
            potential_savings: savings,
            savings_breakdown: vec![],
            advice: Advice::default(),
        }
    }

    fn saved_profile() -> Profile {
        let mut profile = Profile::default();
        profile.profile.age_group = "below_60".into();
        profile.income.salary.salary_total = dec!(1200000);
        profile.deductions.section_80c = dec!(100000);
        profile
    }

    async fn logged_in(service: StubService) -> WizardSession<StubService> {
        let mut session = WizardSession::new(service);
        session
            .dispatch(UiEvent::SetLoginEmail("a@b.co".into()))
            .await;
        session.dispatch(UiEvent::Continue).await;
        assert_eq!(session.screen(), Screen::Wizard);
        session
    }

    #[tokio::test]
    async fn invalid_login_email_blocks_network() {
        for input in ["", "abc", "a@b"] {
            let mut session = WizardSession::new(StubService::new());
            session.dispatch(UiEvent::SetLoginEmail(input.into())).await;
            session.dispatch(UiEvent::Continue).await;

            assert_eq!(session.screen(), Screen::Welcome);
            assert_eq!(
                session.notice(),
                Some(&Notice::Inline(INVALID_LOGIN_EMAIL.into()))
            );
            assert!(session.service().calls().is_empty());
        }
    }

    #[tokio::test]
    async fn found_profile_populates_form() {
        let mut service = StubService::new();
        service.fetch = Fetch::Found(saved_profile());

        let session = logged_in(service).await;

        assert_eq!(session.wizard().current(), Step::Personal);
        assert_eq!(session.confirmed_email(), "a@b.co");
        assert_eq!(form::extract(session.form()), saved_profile());
        assert_eq!(session.service().calls(), vec!["fetch a@b.co"]);
    }

    #[tokio::test]
    async fn not_found_resets_form_without_notice() {
        let mut session = WizardSession::new(StubService::new());
        session.form.edit("capital-gains", "9000").unwrap();

        session.dispatch(UiEvent::SetLoginEmail(" a@b.co ".into())).await;
        session.dispatch(UiEvent::Continue).await;

        assert_eq!(session.screen(), Screen::Wizard);
        assert_eq!(session.notice(), None);
        assert_eq!(session.form(), &FormFields::standard());
        assert_eq!(form::extract(session.form()), Profile::default());
    }

    #[tokio::test]
    async fn fetch_failure_alerts_and_opens_wizard_with_prior_form() {
        let mut service = StubService::new();
        service.fetch = Fetch::Status(503);
        let mut session = WizardSession::new(service);
        session.form.edit("capital-gains", "9000").unwrap();
        let before = session.form().clone();

        session.dispatch(UiEvent::SetLoginEmail("a@b.co".into())).await;
        session.dispatch(UiEvent::Continue).await;

        assert_eq!(session.screen(), Screen::Wizard);
        assert_eq!(session.wizard().current(), Step::Personal);
        assert_eq!(session.confirmed_email(), "a@b.co");
        assert_eq!(session.form(), &before);
        let Some(Notice::Alert(message)) = session.notice() else {
            panic!("expected an alert");
        };
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn navigation_is_linear_and_clamped() {
        let mut session = logged_in(StubService::new()).await;

        session.dispatch(UiEvent::Prev).await;
        assert_eq!(session.wizard().current(), Step::Personal);

        for _ in 0..5 {
            session.dispatch(UiEvent::Next).await;
        }
        assert_eq!(session.wizard().current(), Step::Results);

        session.dispatch(UiEvent::Prev).await;
        assert_eq!(session.wizard().current(), Step::Deductions);
    }

    #[tokio::test]
    async fn navigation_ignored_on_welcome_screen() {
        let mut session = WizardSession::new(StubService::new());
        session.dispatch(UiEvent::Next).await;
        assert_eq!(session.wizard().current(), Step::Personal);
    }

    #[tokio::test]
    async fn bad_edit_reports_inline() {
        let mut session = logged_in(StubService::new()).await;

        session
            .dispatch(UiEvent::Edit {
                field: "age-group".into(),
                value: "ancient".into(),
            })
            .await;

        assert!(matches!(session.notice(), Some(Notice::Inline(_))));
    }

    #[tokio::test]
    async fn submit_saves_then_renders_results() {
        let mut session = logged_in(StubService::new()).await;
        session
            .dispatch(UiEvent::Edit {
                field: "section-80c".into(),
                value: "150000".into(),
            })
            .await;

        session.dispatch(UiEvent::Submit).await;

        assert_eq!(session.wizard().current(), Step::Results);
        assert_eq!(
            session.service().calls(),
            vec!["fetch a@b.co", "save a@b.co 80c=150000", "calculate a@b.co"]
        );
        let ResultsPanel::Ready(view) = session.results() else {
            panic!("expected results, got {:?}", session.results());
        };
        assert_eq!(view.savings, SavingsBadge::Save("₹ 20,800".into()));
    }

    #[tokio::test]
    async fn calculation_500_shows_error_without_cards() {
        let mut service = StubService::new();
        service.calculation = Err(500);
        let mut session = logged_in(service).await;

        session.dispatch(UiEvent::Submit).await;

        let ResultsPanel::Failed(message) = session.results() else {
            panic!("expected failure, got {:?}", session.results());
        };
        assert!(message.contains("500"));
        assert!(!session.results().to_string().contains("Your Tax"));
    }

    #[tokio::test]
    async fn failed_save_skips_calculation() {
        let mut service = StubService::new();
        service.save_status = Some(500);
        let mut session = logged_in(service).await;

        session.dispatch(UiEvent::Submit).await;

        assert_eq!(
            session.service().calls(),
            vec!["fetch a@b.co", "save a@b.co 80c=0"]
        );
        assert_eq!(
            session.results(),
            &ResultsPanel::Failed(
                "An error occurred: Failed to save profile (500). Please check logs for details."
                    .into()
            )
        );
    }

    #[tokio::test]
    async fn submit_with_cleared_email_is_blocked() {
        let mut session = logged_in(StubService::new()).await;
        session.dispatch(UiEvent::SetConfirmedEmail("nope".into())).await;

        session.dispatch(UiEvent::Submit).await;

        assert_eq!(
            session.notice(),
            Some(&Notice::Inline(INVALID_CONFIRMED_EMAIL.into()))
        );
        assert_eq!(session.wizard().current(), Step::Personal);
        assert_eq!(session.service().calls(), vec!["fetch a@b.co"]);
    }

    #[tokio::test]
    async fn begin_submit_shows_loading() {
        let mut session = logged_in(StubService::new()).await;

        let request = session.begin_submit().unwrap();

        assert_eq!(session.results(), &ResultsPanel::Loading);
        assert_eq!(session.wizard().current(), Step::Results);
        assert_eq!(request.email, EmailAddress::parse("a@b.co").unwrap());
    }

    #[tokio::test]
    async fn restart_clears_everything() {
        let mut service = StubService::new();
        service.fetch = Fetch::Found(saved_profile());
        let mut session = logged_in(service).await;
        session.dispatch(UiEvent::Submit).await;

        session.dispatch(UiEvent::Restart).await;

        assert_eq!(session.screen(), Screen::Welcome);
        assert_eq!(session.wizard().current(), Step::Personal);
        assert_eq!(session.login_email(), "");
        assert_eq!(session.results(), &ResultsPanel::Empty);
        assert_eq!(
            session.form().get("salary-total"),
            Some(&WidgetValue::Text("0".into()))
        );
    }
}
