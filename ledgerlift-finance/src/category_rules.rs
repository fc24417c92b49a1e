//! Keyword category rules mapping transaction descriptions to category names.
//!
//! The rules come from a CSV where every column header is a category and the
//! non-blank cells below it are keywords. Matching is case-insensitive
//! substring containment; the first category (by column order) with any
//! matching keyword wins.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use ledgerlift_core::{Cell, UNCATEGORIZED};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryConfigError {
    #[error("reading category rules from {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed category rules CSV")]
    Csv(#[from] csv::Error),

    #[error("category rules CSV has no header row")]
    MissingHeader,

    #[error("category column {column} has an empty name")]
    EmptyName { column: usize },

    #[error("category {0:?} is defined more than once")]
    Duplicate(String),
}

/// One named category and its lowercase keywords
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub name: String,
    pub patterns: Vec<String>,
}

impl CategoryRule {
    fn matches(&self, lowered: &str) -> bool {
        self.patterns.iter().any(|p| lowered.contains(p.as_str()))
    }
}

/// Ordered category dictionary. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDictionary {
    rules: Vec<CategoryRule>,
}

impl CategoryDictionary {
    /// Build from `(name, patterns)` pairs; patterns are lower-cased and
    /// blank ones dropped.
    pub fn new<N, P, I>(categories: I) -> Result<Self, CategoryConfigError>
    where
        I: IntoIterator<Item = (N, Vec<P>)>,
        N: Into<String>,
        P: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for (column, (name, patterns)) in categories.into_iter().enumerate() {
            let name: String = name.into();
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CategoryConfigError::EmptyName { column });
            }
            if !seen.insert(name.clone()) {
                return Err(CategoryConfigError::Duplicate(name));
            }
            let patterns = patterns
                .iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.trim().is_empty())
                .collect();
            rules.push(CategoryRule { name, patterns });
        }

        Ok(Self { rules })
    }

    /// Parse the column-per-category CSV layout.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CategoryConfigError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(CategoryConfigError::MissingHeader);
        }

        let mut columns: Vec<(String, Vec<String>)> = headers
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        for result in rdr.records() {
            let record = result?;
            for (i, field) in record.iter().enumerate() {
                // Cells past the last header have no category to belong to.
                if let Some((_, patterns)) = columns.get_mut(i) {
                    patterns.push(field.to_string());
                }
            }
        }

        Self::new(columns)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, CategoryConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| CategoryConfigError::Open {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        let dict = Self::from_csv_reader(file)?;
        tracing::debug!(
            path = %path.display(),
            categories = dict.len(),
            "loaded category rules"
        );
        Ok(dict)
    }

    /// Category for a description; `"Uncategorized"` when nothing matches.
    pub fn categorize(&self, description: &str) -> &str {
        let lowered = description.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    /// Like [`Self::categorize`], for untyped cells. Non-text is uncategorized.
    pub fn categorize_cell(&self, cell: &Cell) -> &str {
        match cell.as_text() {
            Some(text) => self.categorize(text),
            None => UNCATEGORIZED,
        }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
