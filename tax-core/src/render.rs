//! Turns a [`CalculationResult`] into a display tree.
//!
//! The tree is toolkit independent; the `Display` impls give the plain-text
//! rendering used by terminal front ends.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::{AdviceItem, CalculationResult, TaxSnapshot};
use crate::utils::format_inr;

pub const TAX_SAVING_FALLBACK: &str = "You are already maximizing your savings!";
pub const WELLNESS_FALLBACK: &str = "Keep up the great work!";

/// A run of summary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySegment {
    Plain(String),
    Bold(String),
}

/// One of the two comparison cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: &'static str,
    pub gross_income: String,
    pub taxable_income: String,
    pub total_tax: String,
    /// Set on the card describing the advised scenario.
    pub advised: bool,
}

/// What sits between the two cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavingsBadge {
    /// Formatted amount the user can save.
    Save(String),
    Optimized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    pub name: String,
    pub user_amount: String,
    pub advised_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownTable {
    pub rows: Vec<BreakdownRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceList {
    Items(Vec<AdviceItem>),
    /// Shown instead of an empty list.
    Fallback(&'static str),
}

/// The complete results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub summary: Vec<SummarySegment>,
    pub current: ResultCard,
    pub savings: SavingsBadge,
    pub potential: ResultCard,
    /// `None` when the service reported no per-deduction breakdown.
    pub breakdown: Option<BreakdownTable>,
    pub tax_saving_advice: AdviceList,
    pub wellness_advice: AdviceList,
}

/// State of the results area of the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsPanel {
    #[default]
    Empty,
    /// A calculation is in flight.
    Loading,
    /// Submission failed; the message is shown in place of results.
    Failed(String),
    Ready(Box<ResultsView>),
}

impl ResultsPanel {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Builds the display tree for `result`.
pub fn render(result: &CalculationResult) -> ResultsView {
    ResultsView {
        summary: parse_summary(&result.summary),
        current: card("Your Tax (As Entered)", &result.current_tax, false),
        savings: savings_badge(result.potential_savings),
        potential: card("Your Potential Tax (With Advice)", &result.potential_tax, true),
        breakdown: breakdown(result),
        tax_saving_advice: advice_list(&result.advice.tax_saving_advice, TAX_SAVING_FALLBACK),
        wellness_advice: advice_list(&result.advice.wellness_advice, WELLNESS_FALLBACK),
    }
}

fn card(
    title: &'static str,
    snapshot: &TaxSnapshot,
    advised: bool,
) -> ResultCard {
    ResultCard {
        title,
        gross_income: format_inr(snapshot.gti),
        taxable_income: format_inr(snapshot.taxable_income),
        total_tax: format_inr(snapshot.total_tax),
        advised,
    }
}

fn savings_badge(potential_savings: Decimal) -> SavingsBadge {
    if potential_savings > Decimal::ZERO {
        SavingsBadge::Save(format_inr(potential_savings))
    } else {
        SavingsBadge::Optimized
    }
}

fn breakdown(result: &CalculationResult) -> Option<BreakdownTable> {
    if result.savings_breakdown.is_empty() {
        return None;
    }
    let rows = result
        .savings_breakdown
        .iter()
        .map(|item| BreakdownRow {
            name: item.name.clone(),
            user_amount: format_inr(item.user_amount),
            advised_amount: format_inr(item.advised_amount),
        })
        .collect();
    Some(BreakdownTable { rows })
}

fn advice_list(
    items: &[AdviceItem],
    fallback: &'static str,
) -> AdviceList {
    if items.is_empty() {
        AdviceList::Fallback(fallback)
    } else {
        AdviceList::Items(items.to_vec())
    }
}

/// Splits `**bold**` markers out of summary text. A bold run never spans a
/// line break; unpaired markers stay as literal text.
pub fn parse_summary(text: &str) -> Vec<SummarySegment> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while let Some(found) = text[pos..].find("**") {
        let open = pos + found;
        let body_start = open + 2;
        let line_end = text[body_start..]
            .find('\n')
            .map_or(text.len(), |i| body_start + i);

        match text[body_start..line_end].find("**") {
            Some(close) => {
                if open > plain_start {
                    segments.push(SummarySegment::Plain(text[plain_start..open].to_string()));
                }
                segments.push(SummarySegment::Bold(text[body_start..body_start + close].to_string()));
                pos = body_start + close + 2;
                plain_start = pos;
            }
            // No partner on this line; retry one character later.
            None => pos = open + 1,
        }
    }
    if plain_start < text.len() {
        segments.push(SummarySegment::Plain(text[plain_start..].to_string()));
    }
    segments
}

// ─── plain-text rendering ────────────────────────────────────────────────────

impl fmt::Display for ResultCard {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  Gross Income        {:>16}", self.gross_income)?;
        writeln!(f, "  Taxable Income      {:>16}", self.taxable_income)?;
        write!(f, "  Total Tax Payable   {:>16}", self.total_tax)
    }
}

impl fmt::Display for SavingsBadge {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Save(amount) => write!(f, "  ==> You Can Save {amount}"),
            Self::Optimized => write!(f, "  ✓ Optimized!"),
        }
    }
}

impl fmt::Display for AdviceList {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Items(items) => {
                let lines = items
                    .iter()
                    .map(|item| format!("  • {}: {}", item.title, item.details))
                    .collect::<Vec<_>>();
                f.write_str(&lines.join("\n"))
            }
            Self::Fallback(message) => write!(f, "  {message}"),
        }
    }
}

impl fmt::Display for ResultsView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Your Tax Saving Potential")?;
        for segment in &self.summary {
            match segment {
                SummarySegment::Plain(text) => f.write_str(text)?,
                SummarySegment::Bold(text) => write!(f, "\x1b[1m{text}\x1b[0m")?,
            }
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "{}", self.current)?;
        writeln!(f, "{}", self.savings)?;
        writeln!(f, "{}", self.potential)?;

        if let Some(table) = &self.breakdown {
            writeln!(f)?;
            writeln!(f, "Savings Breakdown")?;
            writeln!(f, "  {:<32} {:>14} {:>16}", "Deduction", "Your Input", "Our Suggestion")?;
            for row in &table.rows {
                writeln!(
                    f,
                    "  {:<32} {:>14} {:>16}",
                    row.name, row.user_amount, row.advised_amount
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "How to Achieve These Savings")?;
        writeln!(f, "{}", self.tax_saving_advice)?;
        writeln!(f)?;
        writeln!(f, "Financial Wellness Advice")?;
        write!(f, "{}", self.wellness_advice)
    }
}

impl fmt::Display for ResultsPanel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Loading => write!(f, "Calculating..."),
            Self::Failed(message) => write!(f, "{message}"),
            Self::Ready(view) => write!(f, "{view}"),
        }
    }
}
