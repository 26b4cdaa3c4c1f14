use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Leading number of an amount: sign, digits, fraction, exponent.
fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([+-]?)([0-9]*)(?:\.([0-9]*))?(?:[eE]([+-]?[0-9]+))?")
            .expect("amount pattern is a valid regex")
    })
}

/// Parses an amount typed into a form field.
///
/// Accepts comma thousands separators (both `1,234,567` and the Indian
/// `12,34,567`) and scientific notation. Like a browser's `parseFloat`, only
/// the leading number counts, so `"12abc"` reads as 12. Returns `None` for
/// empty input, input with no leading digits, and values outside what a
/// [`Decimal`] can hold (such as `1e-40`).
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = normalize_amount_input(s);
    let caps = amount_pattern().captures(&normalized)?;

    let whole = caps.get(2).map_or("", |m| m.as_str());
    let fraction = caps.get(3).map_or("", |m| m.as_str());
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let sign = if caps.get(1).is_some_and(|m| m.as_str() == "-") { "-" } else { "" };
    let whole = if whole.is_empty() { "0" } else { whole };
    let mantissa = if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    };

    match caps.get(4) {
        None => mantissa.parse().ok(),
        Some(exponent) => {
            let exponent = exponent.as_str().trim_start_matches('+');
            Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok()
        }
    }
}

/// Parses an amount, substituting zero when the input is empty or invalid.
///
/// Never fails. Non-empty input that cannot be parsed is logged.
pub fn amount_or_zero(s: &str) -> Decimal {
    match parse_amount(s) {
        Some(value) => value,
        None => {
            if !s.trim().is_empty() {
                tracing::warn!(input = %s, "unparsable amount, using 0");
            }
            Decimal::ZERO
        }
    }
}

/// Text written back into an amount field, without trailing zeros.
pub fn amount_input_text(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Formats an amount in rupees with Indian digit grouping, rounded to whole
/// rupees (e.g. `₹ 12,34,568` for `1234567.5`).
pub fn format_inr(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("₹ {sign}{}", group_indian(&digits))
}

/// Groups a string of ASCII digits as `xx,xx,xxx`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{last_three}", groups.join(","))
}
