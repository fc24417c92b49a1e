use std::path::Path;

use anyhow::{Context, Result};
use ledgerlift_core::RawTable;
use serde::{Deserialize, Serialize};

use super::{JsonTableSet, TableExtractor};

/// Tabula's table detection strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Let Tabula pick per page.
    #[default]
    Decide,
    /// Whitespace-separated columns.
    Stream,
    /// Ruled cell borders.
    Lattice,
}

impl ExtractionMethod {
    fn to_tabula(self) -> tabula::ExtractionMethod {
        match self {
            ExtractionMethod::Decide => tabula::ExtractionMethod::Decide,
            ExtractionMethod::Stream => tabula::ExtractionMethod::Basic,
            ExtractionMethod::Lattice => tabula::ExtractionMethod::Spreadsheet,
        }
    }
}

/// [`TableExtractor`] backed by tabula-java running in an embedded JVM.
///
/// Only one JVM can exist per process, so build this once and reuse it.
pub struct TabulaExtractor {
    vm: tabula::TabulaVM,
    method: ExtractionMethod,
    guess: bool,
}

impl TabulaExtractor {
    /// Start a JVM with the tabula-java jar at `jar_path` on its classpath.
    pub fn new(jar_path: &Path, method: ExtractionMethod, guess: bool) -> Result<Self> {
        let libpath = jar_path
            .to_str()
            .with_context(|| format!("tabula jar path is not UTF-8: {}", jar_path.display()))?;
        let vm = tabula::TabulaVM::new(libpath, false)
            .with_context(|| format!("starting JVM for tabula jar {}", jar_path.display()))?;
        tracing::debug!(jar = %jar_path.display(), ?method, guess, "started Tabula VM");
        Ok(Self { vm, method, guess })
    }
}

impl TableExtractor for TabulaExtractor {
    fn extract_tables(&self, pdf_path: &Path) -> Result<Vec<RawTable>> {
        let env = self.vm.attach().context("attaching to TabulaVM")?;

        // No page list and no areas: every table on every page.
        let tabula = env
            .configure_tabula(
                None,
                None,
                tabula::OutputFormat::Json,
                self.guess,
                self.method.to_tabula(),
                false,
                None,
            )
            .context("configuring Tabula to extract tables")?;

        let extracted_file = tempfile::NamedTempFile::new()
            .context("creating temporary file for extracted table data")?;
        tabula
            .parse_document_into(pdf_path, extracted_file.path())
            .with_context(|| format!("extracting tables from {}", pdf_path.display()))?;

        let table_set: JsonTableSet = serde_json::from_reader(extracted_file)
            .context("parsing extracted table data")?;
        Ok(table_set.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            method: ExtractionMethod,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"method": "lattice"}"#).unwrap();
        assert_eq!(parsed.method, ExtractionMethod::Lattice);
        assert_eq!(ExtractionMethod::default(), ExtractionMethod::Decide);
    }
}
