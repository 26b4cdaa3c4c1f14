//! Plain-text drawing of the session state.

use std::io::{self, Write};

use tax_client::ProfileService;
use tax_core::form::{FieldKind, FieldSpec, WidgetValue, fields_for_step};
use tax_core::{ResultsPanel, Step};

use crate::session::{Notice, Screen, WizardSession};

const RULE: &str = "────────────────────────────────────────────────────────────────";

/// Draws whichever screen the session is on.
pub fn draw<S: ProfileService, W: Write>(
    out: &mut W,
    session: &WizardSession<S>,
) -> io::Result<()> {
    match session.screen() {
        Screen::Welcome => welcome(out, session),
        Screen::Wizard => wizard(out, session),
    }?;
    if let Some(notice) = session.notice() {
        draw_notice(out, notice)?;
    }
    Ok(())
}

fn welcome<S: ProfileService, W: Write>(
    out: &mut W,
    session: &WizardSession<S>,
) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Income tax planner")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Sign in with your email to load a saved profile or start a new one.")?;
    if !session.login_email().is_empty() {
        writeln!(out, "email: {}", session.login_email())?;
    }
    writeln!(out, "type: email <address>")
}

fn wizard<S: ProfileService, W: Write>(
    out: &mut W,
    session: &WizardSession<S>,
) -> io::Result<()> {
    let view = session.step_view();
    writeln!(out, "{RULE}")?;
    writeln!(out, "{view}")?;
    writeln!(out, "{RULE}")?;

    match view.visible {
        Step::Results => draw_results(out, session.results()),
        step => {
            field_list(out, session, step)?;
            if step == Step::Deductions {
                writeln!(out)?;
                writeln!(out, "  saving as: {}", session.confirmed_email())?;
                writeln!(out, "  type 'confirm <address>' to change it, 'submit' when done")?;
            }
            Ok(())
        }
    }
}

/// Lists every field of `step` with its current widget value.
pub fn field_list<S: ProfileService, W: Write>(
    out: &mut W,
    session: &WizardSession<S>,
    step: Step,
) -> io::Result<()> {
    for spec in fields_for_step(step) {
        let value = session
            .form()
            .get(spec.id)
            .map_or_else(|| "-".to_string(), widget_text);
        writeln!(out, "  {:<32} {:<42} {value}", spec.id, spec.label)?;
        if let Some(hint) = kind_hint(spec) {
            writeln!(out, "  {:<32} {hint}", "")?;
        }
    }
    Ok(())
}

fn kind_hint(spec: &FieldSpec) -> Option<String> {
    match spec.kind {
        FieldKind::Number => None,
        FieldKind::Checkbox | FieldKind::YesNo => Some("(yes / no)".to_string()),
        FieldKind::Select(options) => Some(format!("({})", options.join(" / "))),
    }
}

fn widget_text(value: &WidgetValue) -> String {
    match value {
        WidgetValue::Text(text) => text.clone(),
        WidgetValue::Checked(true) => "yes".to_string(),
        WidgetValue::Checked(false) => "no".to_string(),
        WidgetValue::Radio(Some(choice)) if choice == "true" => "yes".to_string(),
        WidgetValue::Radio(Some(_)) => "no".to_string(),
        WidgetValue::Selected(option) if !option.is_empty() => option.clone(),
        WidgetValue::Selected(_) | WidgetValue::Radio(None) => "(not selected)".to_string(),
    }
}

fn draw_results<W: Write>(
    out: &mut W,
    results: &ResultsPanel,
) -> io::Result<()> {
    writeln!(out, "{results}")?;
    if !matches!(results, ResultsPanel::Loading) {
        writeln!(out)?;
        writeln!(out, "type 'prev' to adjust your details or 'restart' to start over")?;
    }
    Ok(())
}

pub fn draw_notice<W: Write>(
    out: &mut W,
    notice: &Notice,
) -> io::Result<()> {
    match notice {
        Notice::Inline(message) => writeln!(out, "  ! {message}"),
        Notice::Alert(message) => writeln!(out, "\n*** {message} ***\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn widget_text_reads_like_the_prompt_accepts() {
        assert_eq!(widget_text(&WidgetValue::Text("1,50,000".into())), "1,50,000");
        assert_eq!(widget_text(&WidgetValue::Checked(true)), "yes");
        assert_eq!(widget_text(&WidgetValue::Radio(Some("false".into()))), "no");
        assert_eq!(widget_text(&WidgetValue::Radio(None)), "(not selected)");
        assert_eq!(widget_text(&WidgetValue::Selected(String::new())), "(not selected)");
    }

    #[test]
    fn alerts_stand_out_from_inline_notices() {
        let mut out = Vec::new();
        draw_notice(&mut out, &Notice::Inline("check this".into())).unwrap();
        draw_notice(&mut out, &Notice::Alert("Could not connect to server.".into())).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  ! check this\n\n*** Could not connect to server. ***\n\n"
        );
    }
}
