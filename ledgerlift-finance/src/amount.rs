//! Currency amount cleaning for statement money columns.
//!
//! Statement cells look like `£1,234.50`, `-£50`, or are blank. Blank means
//! zero. Anything else that does not parse is an error rather than a guess.

use std::sync::LazyLock;

use ledgerlift_core::Cell;
use regex::Regex;
use thiserror::Error;

static CURRENCY_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[£,]").expect("valid currency regex"));

#[derive(Debug, Clone, PartialEq, Error)]
#[error("not a currency amount: {value:?}")]
pub struct AmountError {
    pub value: String,
}

/// Parse a single money value, stripping `£` and thousands separators.
pub fn parse_amount(text: &str) -> Result<f64, AmountError> {
    let cleaned = CURRENCY_NOISE.replace_all(text, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(0.0);
    }

    match cleaned.parse::<f64>() {
        // f64's parser also takes "nan" and "inf"; neither is money.
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(AmountError {
            value: text.to_string(),
        }),
    }
}

/// Clean an extracted cell: missing cells are zero, numbers pass through.
pub fn clean_amount(cell: &Cell) -> Result<f64, AmountError> {
    match cell {
        Cell::Empty => Ok(0.0),
        Cell::Number(n) if n.is_finite() => Ok(*n),
        Cell::Number(n) => Err(AmountError {
            value: n.to_string(),
        }),
        Cell::Text(text) => parse_amount(text),
    }
}
