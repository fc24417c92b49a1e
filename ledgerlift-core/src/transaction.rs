//! Transaction row and table types produced by the normalization pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category assigned when no configured pattern matches
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Fixed output column names, in order
pub const COLUMNS: [&str; 6] = [
    "Date",
    "Description",
    "Money out",
    "Money in",
    "Balance",
    "Category",
];

/// A normalized statement row whose date is still the validated statement text.
///
/// This is what the table normalizer emits per table; the orchestrator turns
/// these into [`TransactionRow`]s once all tables are concatenated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: String,
    pub description: String,
    pub money_out: f64,
    pub money_in: f64,
    pub balance: f64,
    pub category: String,
}

/// A single validated transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// May be assembled from several source lines
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Money out")]
    pub money_out: f64,
    #[serde(rename = "Money in")]
    pub money_in: f64,
    #[serde(rename = "Balance")]
    pub balance: f64,
    #[serde(rename = "Category")]
    pub category: String,
}

impl TransactionRow {
    pub fn is_uncategorized(&self) -> bool {
        self.category == UNCATEGORIZED
    }
}

/// Final output: rows sorted newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    rows: Vec<TransactionRow>,
}

impl TransactionTable {
    /// An empty table. The schema is fixed by [`COLUMNS`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table and order it by date, newest first.
    ///
    /// The sort is stable, so rows sharing a date keep their input order.
    pub fn from_rows(mut rows: Vec<TransactionRow>) -> Self {
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[TransactionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a TransactionRow;
    type IntoIter = std::slice::Iter<'a, TransactionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
