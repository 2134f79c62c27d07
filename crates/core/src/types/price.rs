//! Price representation and rupee formatting.
//!
//! The storefront displays prices in Indian rupees with no fraction digits and
//! Indian digit grouping (the last three digits, then groups of two):
//! `₹1,23,456`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from whole rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display, e.g. `₹1,299`.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().trunc().to_string();

        let mut out = String::with_capacity(digits.len() + 4);
        if negative {
            out.push('-');
        }
        out.push(CURRENCY_SYMBOL);
        out.push_str(&group_indian(&digits));
        out
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// Rupee sign.
pub const CURRENCY_SYMBOL: char = '₹';

/// Placeholder shown when a product has no usable price.
pub const MISSING_PRICE: &str = "N/A";

/// Format an optional price, falling back to [`MISSING_PRICE`].
#[must_use]
pub fn format_price(price: Option<Price>) -> String {
    price.map_or_else(|| MISSING_PRICE.to_owned(), |p| p.display())
}

/// Insert Indian-style group separators into a string of ASCII digits.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}
