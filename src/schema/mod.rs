pub mod types;
pub mod validator;

pub use types::{FeatureSchema, TableError, TransactionTable, ValidatedTable, FEATURE_COUNT};
pub use validator::{SchemaError, SchemaValidator};
