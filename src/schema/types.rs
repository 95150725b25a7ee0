/// Number of features the classifier was trained on.
pub const FEATURE_COUNT: usize = 30;

/// Ordered, canonical feature names: `feature_1` .. `feature_30`.
/// Position matters: it must match the column order used at training time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn canonical() -> Self {
        let names = (1..=FEATURE_COUNT)
            .map(|i| format!("feature_{}", i))
            .collect();
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// First position (0-based) where `columns` disagrees with the schema,
    /// with the expected and found names. Assumes equal lengths.
    pub fn first_mismatch<'a>(&'a self, columns: &'a [String]) -> Option<(usize, &'a str, &'a str)> {
        self.names
            .iter()
            .zip(columns)
            .enumerate()
            .find(|(_, (expected, found))| expected != found)
            .map(|(i, (expected, found))| (i, expected.as_str(), found.as_str()))
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Errors raised while assembling a table from raw input.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("row {row} has {found} values but the header has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("at least one transaction is required")]
    NoTransactions,
    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw tabular input: header names plus numeric rows, all the same width.
/// Rows are numbered from 1 in errors.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TransactionTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, TableError> {
        let expected = columns.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(TableError::RaggedRow {
                row: i + 1,
                expected,
                found: row.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A table that passed schema validation: exactly [`FEATURE_COUNT`] columns
/// carrying the canonical names. Only the validator constructs one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ValidatedTable {
    pub(crate) fn with_canonical_names(schema: &FeatureSchema, rows: Vec<Vec<f64>>) -> Self {
        Self {
            columns: schema.names().to_vec(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
