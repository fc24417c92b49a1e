use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use ledgerlift_core::{Cell, RawTable, format_statement_date, is_valid_date};
use ledgerlift_finance::CategoryDictionary;
use ledgerlift_ingest::{PipelineError, Rejection, StatementProcessor, TableExtractor};

const CATEGORIES_CSV: &str = "\
Groceries,Eating Out,Income
tesco,pret a manger,salary
sainsbury,costa,
";

/// Stands in for Tabula: hands back canned tables and remembers the file it saw.
struct CannedExtractor {
    tables: Vec<RawTable>,
    seen: RefCell<Option<(PathBuf, Vec<u8>)>>,
}

impl CannedExtractor {
    fn new(tables: Vec<RawTable>) -> Self {
        Self {
            tables,
            seen: RefCell::new(None),
        }
    }
}

impl TableExtractor for CannedExtractor {
    fn extract_tables(&self, pdf_path: &Path) -> Result<Vec<RawTable>> {
        let bytes = std::fs::read(pdf_path)?;
        *self.seen.borrow_mut() = Some((pdf_path.to_path_buf(), bytes));
        Ok(self.tables.clone())
    }
}

struct FailingExtractor {
    seen: RefCell<Option<PathBuf>>,
}

impl TableExtractor for FailingExtractor {
    fn extract_tables(&self, pdf_path: &Path) -> Result<Vec<RawTable>> {
        *self.seen.borrow_mut() = Some(pdf_path.to_path_buf());
        bail!("PDF header not found")
    }
}

fn categories() -> Arc<CategoryDictionary> {
    Arc::new(CategoryDictionary::from_csv_reader(CATEGORIES_CSV.as_bytes()).unwrap())
}

fn two_page_statement() -> Vec<RawTable> {
    let page_one = RawTable::from_rows(vec![
        vec!["Date", "Description", "Money out", "Money in", "Balance"],
        vec!["", "Balance brought forward", "", "", "£1,000.00"],
        vec!["03 Sept 2023", "CARD PAYMENT TO TESCO", "£45.10", "", "£954.90"],
        vec!["", "STORES 2231", "", "", ""],
        vec!["28 Sep 2023", "SALARY ACME LTD", "", "£2,500.00", "£3,454.90"],
        vec!["12 Sep 2023", "PRET A MANGER", "£6.45", "", "£948.45"],
    ])
    .with_page(1);

    // Page two is a summary box, not a transaction table.
    let page_two = RawTable::from_rows(vec![
        vec!["Total money out", "£51.55"],
        vec!["Total money in", "£2,500.00"],
    ])
    .with_page(2);

    vec![page_one, page_two]
}

#[test]
fn test_two_page_statement_end_to_end() {
    let extractor = CannedExtractor::new(two_page_statement());
    let processor = StatementProcessor::new(&extractor, categories());

    let processed = processor
        .process_document_with_report(&b"%PDF-1.7 fake statement"[..])
        .unwrap();
    let table = processed.table;

    assert_eq!(table.len(), 3);

    let dates: Vec<_> = table.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2023, 9, 28).unwrap(),
            NaiveDate::from_ymd_opt(2023, 9, 12).unwrap(),
            NaiveDate::from_ymd_opt(2023, 9, 3).unwrap(),
        ]
    );

    assert!(table.iter().all(|r| !r.category.is_empty()));
    assert_eq!(table.rows()[0].category, "Income");
    assert_eq!(table.rows()[0].money_in, 2500.0);
    assert_eq!(table.rows()[1].category, "Eating Out");

    let tesco = &table.rows()[2];
    assert_eq!(tesco.description, "CARD PAYMENT TO TESCO STORES 2231");
    assert_eq!(tesco.money_out, 45.10);
    assert_eq!(tesco.balance, 954.90);
    assert_eq!(tesco.category, "Groceries");

    assert_eq!(processed.report.tables_extracted, 2);
    assert_eq!(processed.report.tables_accepted, 1);
    assert_eq!(processed.report.rejected.len(), 1);
    assert_eq!(processed.report.rejected[0].page, Some(2));
    assert_eq!(
        processed.report.rejected[0].reason,
        Rejection::TooFewColumns { found: 2 }
    );
    assert_eq!(processed.report.rows_dropped, 0);
}

#[test]
fn test_output_dates_revalidate() {
    let extractor = CannedExtractor::new(two_page_statement());
    let processor = StatementProcessor::new(&extractor, categories());
    let table = processor.process_document(&b"%PDF"[..]).unwrap();

    for row in &table {
        assert!(is_valid_date(&format_statement_date(row.date)));
    }
}

#[test]
fn test_document_is_spooled_and_cleaned_up() {
    let extractor = CannedExtractor::new(two_page_statement());
    let processor = StatementProcessor::new(&extractor, categories());
    processor.process_document(&b"%PDF-1.7 bytes"[..]).unwrap();

    let (path, bytes) = extractor.seen.borrow_mut().take().unwrap();
    assert_eq!(bytes, b"%PDF-1.7 bytes");
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
    assert!(!path.exists(), "temporary PDF should be removed");
}

#[test]
fn test_temp_file_removed_on_extraction_failure() {
    let extractor = FailingExtractor {
        seen: RefCell::new(None),
    };
    let processor = StatementProcessor::new(&extractor, categories());

    let err = processor.process_document(&b"not a pdf"[..]).unwrap_err();
    assert!(matches!(err, PipelineError::Extraction(_)));

    let path = extractor.seen.borrow_mut().take().unwrap();
    assert!(!path.exists(), "temporary PDF should be removed");
}

#[test]
fn test_no_tables_gives_empty_schema() {
    let extractor = CannedExtractor::new(Vec::new());
    let processor = StatementProcessor::new(&extractor, categories());
    let table = processor.process_document(&b"%PDF"[..]).unwrap();

    assert!(table.is_empty());
    assert_eq!(
        table.columns(),
        ["Date", "Description", "Money out", "Money in", "Balance", "Category"]
    );
}

#[test]
fn test_bad_amount_skips_only_that_table() {
    let good = RawTable::from_rows(vec![vec!["01 Jan 2024", "TESCO", "£5.00", "", "£95.00"]]);
    let bad = RawTable::new(vec![vec![
        Cell::from("02 Jan 2024"),
        Cell::from("COSTA"),
        Cell::from("£3.x0"),
        Cell::Empty,
        Cell::from("£92.00"),
    ]]);
    let extractor = CannedExtractor::new(vec![good, bad]);
    let processor = StatementProcessor::new(&extractor, categories());

    let processed = processor.process_document_with_report(&b"%PDF"[..]).unwrap();
    assert_eq!(processed.table.len(), 1);
    assert_eq!(processed.table.rows()[0].description, "TESCO");
    assert!(matches!(
        processed.report.rejected[0].reason,
        Rejection::InvalidAmount { column: "Money out", .. }
    ));
}

#[test]
fn test_equal_dates_keep_table_order() {
    let first = RawTable::from_rows(vec![vec!["01 Jan 2024", "first", "", "", ""]]);
    let second = RawTable::from_rows(vec![vec!["01 Jan 2024", "second", "", "", ""]]);
    let extractor = CannedExtractor::new(vec![first, second]);
    let processor = StatementProcessor::new(&extractor, categories());

    let table = processor.process_document(&b"%PDF"[..]).unwrap();
    let order: Vec<_> = table.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(order, vec!["first", "second"]);
}
