use crate::config::ValidationConfig;

use super::types::{FeatureSchema, TransactionTable, ValidatedTable, FEATURE_COUNT};

/// Why a table was refused before scoring. Every variant is user-correctable:
/// fix the input and submit again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("input has {0} columns, more than the {} the model expects", FEATURE_COUNT)]
    TooManyColumns(usize),
    #[error("input has {0} columns, fewer than the {} the model expects", FEATURE_COUNT)]
    TooFewColumns(usize),
    #[error("column {position} is named '{found}', expected '{expected}'")]
    ColumnNameMismatch {
        position: usize,
        expected: String,
        found: String,
    },
}

/// Guards the scoring engine: only tables with exactly [`FEATURE_COUNT`]
/// columns get through.
///
/// Header names are trusted by position, not by name. A 30-column table whose
/// columns are misnamed or semantically out of order is relabelled with the
/// canonical names and accepted, and the model will then score it as if the
/// order were correct. Enable `strict_column_names` to reject such tables.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    schema: FeatureSchema,
    strict_column_names: bool,
}

impl SchemaValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            schema: FeatureSchema::canonical(),
            strict_column_names: config.strict_column_names,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Check the column count and attach canonical names.
    /// The input table is left untouched; the result owns a copy of its rows.
    pub fn validate(&self, table: &TransactionTable) -> Result<ValidatedTable, SchemaError> {
        let observed = table.column_count();
        if observed > self.schema.len() {
            return Err(SchemaError::TooManyColumns(observed));
        }
        if observed < self.schema.len() {
            return Err(SchemaError::TooFewColumns(observed));
        }

        if let Some((position, expected, found)) = self.schema.first_mismatch(table.columns()) {
            if self.strict_column_names {
                return Err(SchemaError::ColumnNameMismatch {
                    position: position + 1,
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
            tracing::warn!(
                position = position + 1,
                expected,
                found,
                "Header differs from feature schema, renaming columns by position"
            );
        }

        Ok(ValidatedTable::with_canonical_names(
            &self.schema,
            table.rows().to_vec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_columns(count: usize, rows: usize) -> TransactionTable {
        let columns = (0..count).map(|i| format!("col_{}", i)).collect();
        let rows = (0..rows)
            .map(|r| (0..count).map(|c| (r * 100 + c) as f64).collect())
            .collect();
        TransactionTable::new(columns, rows).unwrap()
    }

    #[test]
    fn test_too_few_columns() {
        let validator = SchemaValidator::default();
        let err = validator.validate(&table_with_columns(29, 2)).unwrap_err();
        assert_eq!(err, SchemaError::TooFewColumns(29));
        assert!(err.to_string().contains("29 columns"));
        assert!(err.to_string().contains("fewer than the 30"));
    }

    #[test]
    fn test_too_many_columns() {
        let validator = SchemaValidator::default();
        let err = validator.validate(&table_with_columns(31, 2)).unwrap_err();
        assert_eq!(err, SchemaError::TooManyColumns(31));
        assert!(err.to_string().contains("more than the 30"));
    }

    #[test]
    fn test_zero_columns() {
        let validator = SchemaValidator::default();
        let table = TransactionTable::new(vec![], vec![]).unwrap();
        assert_eq!(
            validator.validate(&table).unwrap_err(),
            SchemaError::TooFewColumns(0)
        );
    }

    #[test]
    fn test_misnamed_columns_renamed_by_position() {
        let validator = SchemaValidator::default();
        let table = table_with_columns(FEATURE_COUNT, 3);

        let validated = validator.validate(&table).unwrap();
        assert_eq!(validated.columns(), FeatureSchema::canonical().names());
        assert_eq!(validated.rows(), table.rows());
        // Input keeps its own header
        assert_eq!(table.columns()[0], "col_0");
    }

    #[test]
    fn test_canonical_header_passes_unchanged() {
        let validator = SchemaValidator::default();
        let columns = FeatureSchema::canonical().names().to_vec();
        let rows = vec![vec![0.123456789012; FEATURE_COUNT]];
        let table = TransactionTable::new(columns, rows).unwrap();

        let validated = validator.validate(&table).unwrap();
        assert_eq!(validated.rows()[0][0], 0.123456789012);
        assert_eq!(validated.len(), 1);
    }

    #[test]
    fn test_strict_mode_rejects_misnamed_header() {
        let validator = SchemaValidator::new(&ValidationConfig {
            strict_column_names: true,
        });
        let mut columns = FeatureSchema::canonical().names().to_vec();
        columns.swap(0, 1);
        let table = TransactionTable::new(columns, vec![]).unwrap();

        let err = validator.validate(&table).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ColumnNameMismatch {
                position: 1,
                expected: "feature_1".to_string(),
                found: "feature_2".to_string(),
            }
        );
    }

    #[test]
    fn test_strict_mode_still_checks_count_first() {
        let validator = SchemaValidator::new(&ValidationConfig {
            strict_column_names: true,
        });
        assert_eq!(
            validator.validate(&table_with_columns(5, 1)).unwrap_err(),
            SchemaError::TooFewColumns(5)
        );
    }
}
