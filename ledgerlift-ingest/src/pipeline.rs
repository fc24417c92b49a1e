//! Document-level orchestration: bytes in, sorted transaction table out.

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use ledgerlift_core::{
    RawTable, StatementRow, TransactionRow, TransactionTable, parse_statement_date,
};
use ledgerlift_finance::CategoryDictionary;
use thiserror::Error;

use crate::extract::TableExtractor;
use crate::normalize::{Rejection, normalize};

/// Document-level failures. Per-table problems never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("writing document to a temporary file")]
    TempFile(#[source] io::Error),

    #[error("extracting tables from document")]
    Extraction(#[source] anyhow::Error),
}

/// A table that was skipped, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRejection {
    /// Position in the extractor's output, 0-based.
    pub index: usize,
    pub page: Option<u32>,
    pub reason: Rejection,
}

/// What happened to one document on its way through the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessReport {
    pub tables_extracted: usize,
    pub tables_accepted: usize,
    pub rejected: Vec<TableRejection>,
    /// Rows that passed normalization but whose date still failed to parse.
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedDocument {
    pub table: TransactionTable,
    pub report: ProcessReport,
}

/// Runs statements through extraction, normalization and sorting.
///
/// Holds no per-document state: one processor can serve any number of
/// documents, and the category rules are shared read-only.
pub struct StatementProcessor<E> {
    extractor: E,
    categories: Arc<CategoryDictionary>,
}

impl<E: TableExtractor> StatementProcessor<E> {
    pub fn new(extractor: E, categories: Arc<CategoryDictionary>) -> Self {
        Self {
            extractor,
            categories,
        }
    }

    /// Process one PDF supplied as a byte stream.
    pub fn process_document<R: Read>(&self, reader: R) -> Result<TransactionTable, PipelineError> {
        Ok(self.process_document_with_report(reader)?.table)
    }

    /// Like [`Self::process_document`], also returning the per-table report.
    ///
    /// The stream is spooled to a temporary `.pdf` file that is removed when
    /// this returns, whatever the outcome.
    pub fn process_document_with_report<R: Read>(
        &self,
        mut reader: R,
    ) -> Result<ProcessedDocument, PipelineError> {
        let mut spooled = tempfile::Builder::new()
            .prefix("ledgerlift-")
            .suffix(".pdf")
            .tempfile()
            .map_err(PipelineError::TempFile)?;
        let bytes = io::copy(&mut reader, &mut spooled).map_err(PipelineError::TempFile)?;
        spooled.flush().map_err(PipelineError::TempFile)?;
        tracing::debug!(bytes, path = %spooled.path().display(), "spooled document");

        self.process_path(spooled.path())
    }

    /// Process a PDF that is already on disk.
    pub fn process_path(&self, pdf_path: &Path) -> Result<ProcessedDocument, PipelineError> {
        let tables = self
            .extractor
            .extract_tables(pdf_path)
            .map_err(PipelineError::Extraction)?;

        let processed = self.process_tables(&tables);
        tracing::info!(
            tables = processed.report.tables_extracted,
            accepted = processed.report.tables_accepted,
            rejected = processed.report.rejected.len(),
            rows = processed.table.len(),
            "processed document"
        );
        Ok(processed)
    }

    /// Normalize, concatenate and sort already-extracted tables.
    pub fn process_tables(&self, tables: &[RawTable]) -> ProcessedDocument {
        let mut report = ProcessReport {
            tables_extracted: tables.len(),
            ..ProcessReport::default()
        };
        let mut fragments = Vec::new();

        for (index, table) in tables.iter().enumerate() {
            match normalize(table, &self.categories) {
                Ok(rows) => {
                    tracing::debug!(index, page = ?table.page, rows = rows.len(), "accepted table");
                    report.tables_accepted += 1;
                    fragments.push(rows);
                }
                Err(reason) => {
                    tracing::warn!(index, page = ?table.page, %reason, "skipping table");
                    report.rejected.push(TableRejection {
                        index,
                        page: table.page,
                        reason,
                    });
                }
            }
        }

        if fragments.is_empty() {
            return ProcessedDocument {
                table: TransactionTable::empty(),
                report,
            };
        }

        let (table, rows_dropped) = assemble(fragments);
        report.rows_dropped = rows_dropped;
        ProcessedDocument { table, report }
    }
}

/// Concatenate fragments in order, parse dates, and sort newest first.
///
/// Returns the table and how many rows were dropped for unparseable dates.
fn assemble(fragments: Vec<Vec<StatementRow>>) -> (TransactionTable, usize) {
    let mut dropped = 0;
    let mut rows = Vec::new();

    for row in fragments.into_iter().flatten() {
        match parse_statement_date(&row.date) {
            Some(date) => rows.push(TransactionRow {
                date,
                description: row.description,
                money_out: row.money_out,
                money_in: row.money_in,
                balance: row.balance,
                category: row.category,
            }),
            None => {
                tracing::warn!(date = %row.date, "dropping row with unparseable date");
                dropped += 1;
            }
        }
    }

    (TransactionTable::from_rows(rows), dropped)
}
