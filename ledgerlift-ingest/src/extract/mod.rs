pub mod tabula_jni;

use std::path::Path;

use anyhow::Result;
use ledgerlift_core::{Cell, RawTable};
use serde::Deserialize;

pub use tabula_jni::{ExtractionMethod, TabulaExtractor};

/// Extracts every table from every page of a PDF file, in page order.
///
/// No header inference: the first row of each table is data like any other.
pub trait TableExtractor {
    fn extract_tables(&self, pdf_path: &Path) -> Result<Vec<RawTable>>;
}

impl<T: TableExtractor + ?Sized> TableExtractor for &T {
    fn extract_tables(&self, pdf_path: &Path) -> Result<Vec<RawTable>> {
        (**self).extract_tables(pdf_path)
    }
}

/// A sequence of extracted tables as written by Tabula's JSON output.
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct JsonTableSet(pub Vec<JsonTable>);

/// A single extracted table. Geometry fields are accepted but unused.
#[derive(Deserialize, Debug)]
pub struct JsonTable {
    #[serde(default)]
    pub page_number: Option<u32>,
    pub data: Vec<JsonRow>,
}

#[derive(Deserialize, Debug)]
pub struct JsonRow(pub Vec<JsonCell>);

#[derive(Deserialize, Debug)]
pub struct JsonCell {
    pub text: String,
}

impl From<JsonTableSet> for Vec<RawTable> {
    fn from(value: JsonTableSet) -> Self {
        value.0.into_iter().map(Into::into).collect()
    }
}

impl From<JsonTable> for RawTable {
    fn from(value: JsonTable) -> Self {
        let table = RawTable::new(
            value
                .data
                .into_iter()
                .map(|row| row.0.into_iter().map(|cell| Cell::from_text(cell.text)).collect())
                .collect(),
        );
        match value.page_number {
            Some(page) => table.with_page(page),
            None => table,
        }
    }
}
