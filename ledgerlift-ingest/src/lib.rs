//! ledgerlift-ingest: PDF table extraction, per-table normalization, and the
//! statement processing pipeline.

pub mod extract;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod types;

pub use extract::{ExtractionMethod, TableExtractor, TabulaExtractor};
pub use merge::merge_descriptions;
pub use normalize::{Rejection, normalize};
pub use pipeline::{PipelineError, ProcessReport, ProcessedDocument, StatementProcessor, TableRejection};
pub use types::{MoneyColumn, RawStatementRow, STATEMENT_COLUMNS, StatementLine};
