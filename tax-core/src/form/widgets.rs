use std::collections::BTreeMap;

use thiserror::Error;

use super::fields::{FIELDS, FieldKind, field};

/// Raw state of one input widget, exactly as the user left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetValue {
    /// Text of an amount input; not necessarily numeric.
    Text(String),
    Checked(bool),
    Selected(String),
    /// Value of the checked radio button, if any.
    Radio(Option<String>),
}

impl WidgetValue {
    /// The state a widget of `kind` is in after a form reset.
    pub fn reset_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Number => Self::Text("0".to_string()),
            FieldKind::Checkbox => Self::Checked(false),
            FieldKind::Select(_) => Self::Selected(String::new()),
            FieldKind::YesNo => Self::Radio(None),
        }
    }
}

/// Errors from applying a user edit to a widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no field named '{0}'")]
    UnknownField(String),

    #[error("'{value}' is not an option for {field}; choose one of: {options}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        options: String,
    },

    #[error("{field} expects yes or no, got '{value}'")]
    InvalidToggle { field: &'static str, value: String },
}

/// The named inputs of a host form.
///
/// A store only knows the widgets it was built with; reads of other names
/// return `None` and writes to them are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    widgets: BTreeMap<&'static str, WidgetValue>,
}

impl FormFields {
    /// A store with no widgets at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store holding every wizard widget in its reset state.
    pub fn standard() -> Self {
        let mut fields = Self::empty();
        for spec in FIELDS {
            fields.add(spec.id, WidgetValue::reset_for(spec.kind));
        }
        fields
    }

    /// Adds (or replaces) a widget. Names outside the field table are ignored.
    pub fn add(
        &mut self,
        id: &str,
        value: WidgetValue,
    ) {
        if let Some(spec) = field(id) {
            self.widgets.insert(spec.id, value);
        }
    }

    pub fn remove(
        &mut self,
        id: &str,
    ) -> Option<WidgetValue> {
        self.widgets.remove(id)
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&WidgetValue> {
        self.widgets.get(id)
    }

    pub fn contains(
        &self,
        id: &str,
    ) -> bool {
        self.widgets.contains_key(id)
    }

    /// Overwrites an existing widget; does nothing when the widget is absent.
    pub fn set(
        &mut self,
        id: &str,
        value: WidgetValue,
    ) {
        if let Some(slot) = self.widgets.get_mut(id) {
            *slot = value;
        }
    }

    /// Puts every present widget back into its reset state.
    pub fn reset(&mut self) {
        for (id, value) in self.widgets.iter_mut() {
            if let Some(spec) = field(id) {
                *value = WidgetValue::reset_for(spec.kind);
            }
        }
    }

    /// Applies text typed by the user to the widget named `id`.
    ///
    /// Amount text is stored as typed. Checkboxes and the yes/no pair accept
    /// `yes`/`no`, `true`/`false`, `y`/`n` and `1`/`0`. Selects accept one of
    /// their listed options.
    pub fn edit(
        &mut self,
        id: &str,
        raw: &str,
    ) -> Result<(), FormError> {
        let spec = field(id).ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        let raw = raw.trim();

        let value = match spec.kind {
            FieldKind::Number => WidgetValue::Text(raw.to_string()),
            FieldKind::Checkbox => WidgetValue::Checked(parse_toggle(spec.id, raw)?),
            FieldKind::YesNo => WidgetValue::Radio(Some(parse_toggle(spec.id, raw)?.to_string())),
            FieldKind::Select(options) => {
                if !options.iter().any(|option| *option == raw) {
                    return Err(FormError::InvalidChoice {
                        field: spec.id,
                        value: raw.to_string(),
                        options: options.join(", "),
                    });
                }
                WidgetValue::Selected(raw.to_string())
            }
        };

        self.set(spec.id, value);
        Ok(())
    }
}

fn parse_toggle(
    field: &'static str,
    raw: &str,
) -> Result<bool, FormError> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(FormError::InvalidToggle {
            field,
            value: raw.to_string(),
        }),
    }
}
