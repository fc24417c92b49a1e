//! CSV rendering of transaction tables and output file naming.

use anyhow::{Context, Result};
use ledgerlift_core::{COLUMNS, TransactionTable};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `table` as CSV: fixed header, ISO dates, one row per transaction.
///
/// The header is written even when the table is empty.
pub fn write_table_csv<W: Write>(table: &TransactionTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for row in table {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// `statements/march.pdf` -> `<out_dir>/march.csv`
pub fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string());
    out_dir.join(format!("{stem}.csv"))
}

pub fn write_table_file(table: &TransactionTable, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_table_csv(table, file).with_context(|| format!("write {}", path.display()))
}
