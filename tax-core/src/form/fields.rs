//! The field table shared by [`extract`](super::extract) and
//! [`populate`](super::populate).
//!
//! Each entry ties one named input to one place in [`Profile`]. Because both
//! directions of the codec walk this table, a field cannot be read without
//! also being written back.

use rust_decimal::Decimal;

use crate::models::{AGE_GROUPS, DISABILITY_LEVELS, Profile, RESIDENT_STATUSES};
use crate::wizard::Step;

/// Which kind of input widget backs a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-text amount input.
    Number,
    /// A single checkbox.
    Checkbox,
    /// A drop-down with the listed options.
    Select(&'static [&'static str]),
    /// A pair of radio buttons valued `"true"` / `"false"`.
    YesNo,
}

/// A typed value moving between a widget and the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Number(Decimal),
    Flag(bool),
    Choice(String),
}

/// One row of the field table.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// Widget name, as used by the host UI.
    pub id: &'static str,
    pub label: &'static str,
    /// The wizard step that shows this field.
    pub step: Step,
    pub kind: FieldKind,
    pub get: fn(&Profile) -> FieldValue,
    /// Stores a value; a value of the wrong variant is ignored.
    pub set: fn(&mut Profile, FieldValue),
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("id", &self.id)
            .field("step", &self.step)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl FieldSpec {
    /// The value a freshly reset form extracts to.
    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Number => FieldValue::Number(Decimal::ZERO),
            FieldKind::Checkbox | FieldKind::YesNo => FieldValue::Flag(false),
            FieldKind::Select(_) => FieldValue::Choice(String::new()),
        }
    }
}

macro_rules! number_field {
    ($id:literal, $label:literal, $step:ident, $($path:ident).+) => {
        FieldSpec {
            id: $id,
            label: $label,
            step: Step::$step,
            kind: FieldKind::Number,
            get: |p: &Profile| FieldValue::Number(p.$($path).+),
            set: |p: &mut Profile, v: FieldValue| {
                if let FieldValue::Number(n) = v {
                    p.$($path).+ = n;
                }
            },
        }
    };
}

macro_rules! flag_field {
    ($id:literal, $label:literal, $step:ident, $kind:expr, $($path:ident).+) => {
        FieldSpec {
            id: $id,
            label: $label,
            step: Step::$step,
            kind: $kind,
            get: |p: &Profile| FieldValue::Flag(p.$($path).+),
            set: |p: &mut Profile, v: FieldValue| {
                if let FieldValue::Flag(b) = v {
                    p.$($path).+ = b;
                }
            },
        }
    };
}

macro_rules! choice_field {
    ($id:literal, $label:literal, $step:ident, $options:expr, $($path:ident).+) => {
        FieldSpec {
            id: $id,
            label: $label,
            step: Step::$step,
            kind: FieldKind::Select($options),
            get: |p: &Profile| FieldValue::Choice((p.$($path).+).clone()),
            set: |p: &mut Profile, v: FieldValue| {
                if let FieldValue::Choice(s) = v {
                    p.$($path).+ = s;
                }
            },
        }
    };
}

/// Every wizard input, in on-screen order.
///
/// `deductions.section_80g` is deliberately absent: no input feeds it and
/// extraction always emits zero.
pub static FIELDS: &[FieldSpec] = &[
    // Step 1
    choice_field!("age-group", "Age group", Personal, AGE_GROUPS, profile.age_group),
    choice_field!(
        "resident-status",
        "Residential status",
        Personal,
        RESIDENT_STATUSES,
        profile.resident_status
    ),
    // Step 2
    number_field!("salary-total", "Total salary", Income, income.salary.salary_total),
    number_field!("salary-basic", "Basic salary", Income, income.salary.salary_basic),
    number_field!("salary-hra", "HRA received", Income, income.salary.salary_hra),
    number_field!(
        "hp-rent-received",
        "Rent received from house property",
        Income,
        income.house_property.hp_rent_received
    ),
    number_field!(
        "hp-municipal-taxes",
        "Municipal taxes paid",
        Income,
        income.house_property.hp_municipal_taxes
    ),
    number_field!("capital-gains", "Capital gains", Income, income.capital_gains),
    number_field!(
        "business-profession",
        "Business / profession income",
        Income,
        income.business_profession
    ),
    number_field!("other-sources", "Income from other sources", Income, income.other_sources),
    number_field!(
        "other-sources-interest-savings",
        "Savings account interest",
        Income,
        income.other_sources_interest_savings
    ),
    // Step 3
    number_field!("rent-paid", "Rent paid", Deductions, deductions.hra_details.rent_paid),
    flag_field!(
        "is_metro",
        "Living in a metro city",
        Deductions,
        FieldKind::YesNo,
        deductions.hra_details.is_metro
    ),
    number_field!("section-80c", "Section 80C investments", Deductions, deductions.section_80c),
    number_field!(
        "section-80ccd-1b",
        "Section 80CCD(1B) NPS contribution",
        Deductions,
        deductions.section_80ccd_1b
    ),
    number_field!(
        "section-80d-self",
        "Section 80D health insurance (self)",
        Deductions,
        deductions.section_80d_self
    ),
    flag_field!(
        "self-above-60",
        "Self is a senior citizen",
        Deductions,
        FieldKind::Checkbox,
        deductions.self_above_60
    ),
    number_field!(
        "section-80d-parents",
        "Section 80D health insurance (parents)",
        Deductions,
        deductions.section_80d_parents
    ),
    flag_field!(
        "parents-above-60",
        "Parents are senior citizens",
        Deductions,
        FieldKind::Checkbox,
        deductions.parents_above_60
    ),
    number_field!("section-24b", "Section 24(b) home loan interest", Deductions, deductions.section_24b),
    number_field!("section-80e", "Section 80E education loan interest", Deductions, deductions.section_80e),
    choice_field!(
        "section-80u",
        "Section 80U disability (self)",
        Deductions,
        DISABILITY_LEVELS,
        deductions.section_80u
    ),
    choice_field!(
        "section-80dd",
        "Section 80DD disabled dependant",
        Deductions,
        DISABILITY_LEVELS,
        deductions.section_80dd
    ),
];

/// Looks up a field by widget name.
pub fn field(id: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.id == id)
}

/// Fields shown on `step`, in on-screen order.
pub fn fields_for_step(step: Step) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |f| f.step == step)
}
