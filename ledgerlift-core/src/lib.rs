//! ledgerlift-core: statement dates, raw extracted tables, and transaction types

pub mod date;
pub mod raw;
pub mod transaction;

pub use date::{
    STATEMENT_DATE_FORMAT, format_statement_date, is_valid_date, normalize_month_spelling,
    parse_date, parse_statement_date,
};
pub use raw::{Cell, RawRow, RawTable};
pub use transaction::{COLUMNS, StatementRow, TransactionRow, TransactionTable, UNCATEGORIZED};
