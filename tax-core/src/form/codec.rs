use rust_decimal::Decimal;

use super::fields::{FIELDS, FieldKind, FieldSpec, FieldValue};
use super::widgets::{FormFields, WidgetValue};
use crate::models::Profile;
use crate::utils::{amount_input_text, amount_or_zero};

/// Reads every field of the table out of `form`.
///
/// Never fails: a missing widget, or one holding the wrong kind of state,
/// yields the field's default (0, false or empty); amount text that does not
/// parse yields 0. `section_80g` is always 0.
pub fn extract(form: &FormFields) -> Profile {
    let mut profile = Profile::default();
    for spec in FIELDS {
        (spec.set)(&mut profile, read_widget(spec, form.get(spec.id)));
    }
    profile.deductions.section_80g = Decimal::ZERO;
    profile
}

/// Writes every field of `profile` into the matching widget of `form`.
///
/// Widgets that the form does not have are skipped.
pub fn populate(
    form: &mut FormFields,
    profile: &Profile,
) {
    for spec in FIELDS {
        form.set(spec.id, write_widget(spec, (spec.get)(profile)));
    }
}

fn read_widget(
    spec: &FieldSpec,
    widget: Option<&WidgetValue>,
) -> FieldValue {
    match (spec.kind, widget) {
        (FieldKind::Number, Some(WidgetValue::Text(text))) => FieldValue::Number(amount_or_zero(text)),
        (FieldKind::Checkbox, Some(WidgetValue::Checked(checked))) => FieldValue::Flag(*checked),
        (FieldKind::Select(_), Some(WidgetValue::Selected(choice))) => FieldValue::Choice(choice.clone()),
        // No selection counts as "no".
        (FieldKind::YesNo, Some(WidgetValue::Radio(selected))) => {
            FieldValue::Flag(selected.as_deref() == Some("true"))
        }
        _ => spec.default_value(),
    }
}

fn write_widget(
    spec: &FieldSpec,
    value: FieldValue,
) -> WidgetValue {
    match (spec.kind, value) {
        (FieldKind::YesNo, FieldValue::Flag(flag)) => WidgetValue::Radio(Some(flag.to_string())),
        (_, FieldValue::Flag(flag)) => WidgetValue::Checked(flag),
        (_, FieldValue::Number(amount)) => WidgetValue::Text(amount_input_text(amount)),
        (_, FieldValue::Choice(choice)) => WidgetValue::Selected(choice),
    }
}
