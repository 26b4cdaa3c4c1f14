use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Age bracket options offered by the wizard, in display order.
pub const AGE_GROUPS: &[&str] = &["below_60", "60_to_80", "above_80"];

/// Residency options offered by the wizard, in display order.
pub const RESIDENT_STATUSES: &[&str] = &["resident", "non_resident"];

/// Disability claim options for sections 80U and 80DD.
pub const DISABILITY_LEVELS: &[&str] = &["none", "disability", "severe_disability"];

/// The persisted financial-input record for one user.
///
/// Every amount defaults to zero when missing from the wire format, so a
/// partially filled record from the service still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub profile: PersonalDetails,
    pub income: Income,
    pub deductions: Deductions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    /// One of [`AGE_GROUPS`], carried verbatim.
    pub age_group: String,
    /// One of [`RESIDENT_STATUSES`], carried verbatim.
    pub resident_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Income {
    pub salary: SalaryIncome,
    pub house_property: HousePropertyIncome,
    pub capital_gains: Decimal,
    pub business_profession: Decimal,
    pub other_sources: Decimal,
    /// Savings-account interest, a subset of `other_sources`.
    pub other_sources_interest_savings: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryIncome {
    pub salary_total: Decimal,
    pub salary_basic: Decimal,
    pub salary_hra: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HousePropertyIncome {
    pub hp_rent_received: Decimal,
    pub hp_municipal_taxes: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    pub hra_details: HraDetails,
    pub section_80c: Decimal,
    pub section_80ccd_1b: Decimal,
    pub section_80d_self: Decimal,
    pub self_above_60: bool,
    pub section_80d_parents: Decimal,
    pub parents_above_60: bool,
    pub section_24b: Decimal,
    pub section_80e: Decimal,
    /// Always zero when produced by the form; no input feeds it.
    pub section_80g: Decimal,
    /// One of [`DISABILITY_LEVELS`], carried verbatim.
    pub section_80u: String,
    /// One of [`DISABILITY_LEVELS`], carried verbatim.
    pub section_80dd: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HraDetails {
    pub rent_paid: Decimal,
    pub is_metro: bool,
}
