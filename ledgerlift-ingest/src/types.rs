use ledgerlift_core::{Cell, RawRow, normalize_month_spelling};

/// Positional column names assigned to the first five extracted columns.
pub const STATEMENT_COLUMNS: [&str; 5] = ["Date", "Description", "Money out", "Money in", "Balance"];

/// Column of a statement table that carries money.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyColumn {
    MoneyOut,
    MoneyIn,
    Balance,
}

impl MoneyColumn {
    pub fn name(self) -> &'static str {
        match self {
            MoneyColumn::MoneyOut => STATEMENT_COLUMNS[2],
            MoneyColumn::MoneyIn => STATEMENT_COLUMNS[3],
            MoneyColumn::Balance => STATEMENT_COLUMNS[4],
        }
    }
}

impl std::fmt::Display for MoneyColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An extracted row cut down to the five statement columns.
///
/// Cells past the fifth are discarded; short rows are padded with
/// [`Cell::Empty`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatementRow {
    pub date: Cell,
    pub description: Cell,
    pub money_out: Cell,
    pub money_in: Cell,
    pub balance: Cell,
}

impl RawStatementRow {
    pub fn from_raw_row(row: &RawRow) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            date: cell(0),
            description: cell(1),
            money_out: cell(2),
            money_in: cell(3),
            balance: cell(4),
        }
    }
}

/// A statement row with text date/description, amounts still uncleaned.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementLine {
    /// Month spelling already normalized ("Sept" -> "Sep"); may be blank.
    pub date: String,
    pub description: String,
    pub money_out: Cell,
    pub money_in: Cell,
    pub balance: Cell,
}

impl StatementLine {
    pub fn money(&self, column: MoneyColumn) -> &Cell {
        match column {
            MoneyColumn::MoneyOut => &self.money_out,
            MoneyColumn::MoneyIn => &self.money_in,
            MoneyColumn::Balance => &self.balance,
        }
    }
}

impl From<RawStatementRow> for StatementLine {
    /// Missing date/description become `""`.
    fn from(row: RawStatementRow) -> Self {
        Self {
            date: normalize_month_spelling(&row.date.to_text()),
            description: row.description.to_text(),
            money_out: row.money_out,
            money_in: row.money_in,
            balance: row.balance,
        }
    }
}
