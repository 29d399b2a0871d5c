//! Price normalization and fixed-precision arithmetic.
//!
//! Scraped prices arrive as free text ("$1,299.00", "£9.99", "12,50 €").
//! [`parse_price`] turns that text into a positive [`Decimal`] rounded to
//! [`MONEY_DP`] places, or fails with [`PriceParseError`].

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places used for every stored amount and threshold comparison.
pub const MONEY_DP: u32 = 2;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '£', '€', '¥'];

/// Raw price text could not be turned into a positive amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not parse price from {raw:?}")]
pub struct PriceParseError {
    /// The text that failed to parse.
    pub raw: String,
}

impl PriceParseError {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
        }
    }
}

/// Round an amount to [`MONEY_DP`] places, midpoint away from zero.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse scraped price text into a positive amount.
///
/// Currency symbols, currency codes and whitespace are ignored. A comma is
/// treated as the decimal separator only when it is the last separator and is
/// followed by one or two digits; otherwise commas are thousands separators.
///
/// # Errors
///
/// Returns [`PriceParseError`] when no amount can be read or the amount is
/// not strictly positive.
pub fn parse_price(raw: &str) -> Result<Decimal, PriceParseError> {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_whitespace() || CURRENCY_SYMBOLS.contains(&c) || c.is_ascii_alphabetic() {
            continue;
        }
        if c.is_ascii_digit() || c == '.' || c == ',' {
            cleaned.push(c);
        } else {
            return Err(PriceParseError::new(raw));
        }
    }

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(PriceParseError::new(raw));
    }

    let normalized = normalize_separators(&cleaned);
    let value = Decimal::from_str(&normalized).map_err(|_| PriceParseError::new(raw))?;
    let value = round_money(value);
    if value <= Decimal::ZERO {
        return Err(PriceParseError::new(raw));
    }

    Ok(value)
}

fn normalize_separators(text: &str) -> String {
    let last_comma = text.rfind(',');
    let last_dot = text.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => text.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => text.replace(',', ""),
        (Some(comma), None) => {
            let decimals = text.len() - comma - 1;
            if text.matches(',').count() == 1 && (1..=2).contains(&decimals) {
                text.replace(',', ".")
            } else {
                text.replace(',', "")
            }
        }
        (None, Some(_)) if text.matches('.').count() > 1 => text.replace('.', ""),
        _ => text.to_string(),
    }
}
