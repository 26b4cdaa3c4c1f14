use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a calculation request, as returned by the tax service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationResult {
    /// Free text; `**...**` marks bold segments.
    pub summary: String,
    /// Best outcome for the profile as entered.
    pub current_tax: TaxSnapshot,
    /// Best outcome once the advice is followed.
    pub potential_tax: TaxSnapshot,
    pub potential_savings: Decimal,
    pub savings_breakdown: Vec<SavingsBreakdownItem>,
    pub advice: Advice,
}

/// A computed tax outcome for one scenario.
///
/// The service includes extra keys (regime, cess, ...) which are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSnapshot {
    /// Gross total income.
    pub gti: Decimal,
    pub taxable_income: Decimal,
    pub total_tax: Decimal,
}

/// Per-deduction comparison of the entered amount against the advised one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsBreakdownItem {
    pub name: String,
    pub user_amount: Decimal,
    pub advised_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Advice {
    pub tax_saving_advice: Vec<AdviceItem>,
    pub wellness_advice: Vec<AdviceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceItem {
    pub title: String,
    pub details: String,
}
