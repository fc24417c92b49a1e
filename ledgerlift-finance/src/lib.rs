//! ledgerlift-finance: category rules and currency amount cleaning

pub mod amount;
pub mod category_rules;

pub use amount::{AmountError, clean_amount, parse_amount};
pub use category_rules::{CategoryConfigError, CategoryDictionary, CategoryRule};
