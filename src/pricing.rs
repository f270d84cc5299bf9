//! Pricing
//!
//! Amount arithmetic for cart event payloads. Line amounts are plain `f64`
//! products so they render exactly like a naive `price * quantity` would, while
//! grand totals are summed as decimals and rounded to the currency's minor unit.

use std::{num::FpCategory, str::FromStr};

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};

/// Convert a money amount into the nearest `f64`.
pub fn money_to_f64(money: &Money<'_, Currency>) -> f64 {
    let amount = money.amount();

    // Parsing the decimal text gives the correctly rounded f64.
    amount
        .to_string()
        .parse::<f64>()
        .ok()
        .or_else(|| amount.to_f64())
        .unwrap_or_default()
}

/// Multiply a unit amount by a quantity using `f64` arithmetic.
pub fn line_amount(unit: &Money<'_, Currency>, quantity: u32) -> f64 {
    money_to_f64(unit) * f64::from(quantity)
}

/// Render an `f64` using its shortest round-trip representation.
///
/// Zero (including negative zero) and non-finite values render as `"0"`.
pub fn format_amount(value: f64) -> String {
    match value.classify() {
        FpCategory::Zero | FpCategory::Nan | FpCategory::Infinite => "0".to_string(),
        FpCategory::Normal | FpCategory::Subnormal => value.to_string(),
    }
}

/// Convert a rendered `f64` amount into a decimal.
pub fn amount_to_decimal(value: f64) -> Decimal {
    Decimal::from_str(&format_amount(value))
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .unwrap_or_default()
}

/// Sum amounts as decimals and render the result with the currency's number of
/// minor unit digits, e.g. `10.99 + 11.11` renders as `"22.10"`.
pub fn sum_amounts(amounts: impl IntoIterator<Item = f64>, currency: &Currency) -> String {
    format_decimal(decimal_sum(amounts), currency)
}

/// Sum amounts as decimals and render the result without trailing zeros,
/// e.g. `0.1 + 0.2` renders as `"0.3"` and an empty sum as `"0"`.
pub fn sum_amounts_plain(amounts: impl IntoIterator<Item = f64>) -> String {
    decimal_sum(amounts).normalize().to_string()
}

fn decimal_sum(amounts: impl IntoIterator<Item = f64>) -> Decimal {
    amounts
        .into_iter()
        .map(amount_to_decimal)
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// Round a decimal to the currency exponent and render it with exactly that many
/// decimal places.
pub fn format_decimal(amount: Decimal, currency: &Currency) -> String {
    let rounded =
        amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);

    let places = usize::try_from(currency.exponent).unwrap_or(2);

    format!("{rounded:.places$}")
}
