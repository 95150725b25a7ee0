use crate::schema::{FeatureSchema, TableError, TransactionTable};

/// Build a table from hand-entered transactions, one value per feature.
/// The header is the canonical schema, so a width mismatch surfaces as a
/// ragged row rather than a column-count error.
pub fn from_entries(entries: Vec<Vec<f64>>) -> Result<TransactionTable, TableError> {
    if entries.is_empty() {
        return Err(TableError::NoTransactions);
    }
    TransactionTable::new(FeatureSchema::canonical().names().to_vec(), entries)
}
