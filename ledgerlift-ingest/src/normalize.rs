//! Per-table normalization: shape checks, column adaptation, continuation
//! merging, amount cleaning, and categorization.

use ledgerlift_core::{RawTable, StatementRow, is_valid_date};
use ledgerlift_finance::{CategoryDictionary, clean_amount};
use thiserror::Error;

use crate::merge::merge_descriptions;
use crate::types::{MoneyColumn, RawStatementRow, STATEMENT_COLUMNS, StatementLine};

/// Why an extracted table contributed nothing to the output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("table has {found} columns, need at least {}", STATEMENT_COLUMNS.len())]
    TooFewColumns { found: usize },

    #[error("no row has a valid statement date")]
    NoValidDates,

    /// The whole table is dropped rather than inventing a zero.
    #[error("row {row} column {column:?}: not a currency amount: {value:?}")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Turn one extracted table into normalized statement rows.
///
/// The returned rows are in source order and have not been date-sorted.
pub fn normalize(
    table: &RawTable,
    categories: &CategoryDictionary,
) -> Result<Vec<StatementRow>, Rejection> {
    let found = table.column_count();
    if found < STATEMENT_COLUMNS.len() {
        return Err(Rejection::TooFewColumns { found });
    }

    let rows: Vec<RawStatementRow> = table.rows.iter().map(RawStatementRow::from_raw_row).collect();

    if !rows.iter().any(|row| row.date.is_valid_date()) {
        return Err(Rejection::NoValidDates);
    }

    let lines: Vec<StatementLine> = rows.into_iter().map(StatementLine::from).collect();
    let merged = merge_descriptions(lines);

    merged
        .into_iter()
        .filter(|line| is_valid_date(&line.date))
        .enumerate()
        .map(|(row, line)| clean_line(row, line, categories))
        .collect()
}

fn clean_line(
    row: usize,
    line: StatementLine,
    categories: &CategoryDictionary,
) -> Result<StatementRow, Rejection> {
    let amount = |column: MoneyColumn| {
        clean_amount(line.money(column)).map_err(|err| Rejection::InvalidAmount {
            row,
            column: column.name(),
            value: err.value,
        })
    };

    let money_out = amount(MoneyColumn::MoneyOut)?;
    let money_in = amount(MoneyColumn::MoneyIn)?;
    let balance = amount(MoneyColumn::Balance)?;
    let category = categories.categorize(&line.description).to_string();

    Ok(StatementRow {
        date: line.date,
        description: line.description,
        money_out,
        money_in,
        balance,
        category,
    })
}
