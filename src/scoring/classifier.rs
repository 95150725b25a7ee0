use crate::schema::ValidatedTable;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A trained binary classifier.
///
/// `predict` receives the whole batch at once and must return one raw label
/// per row, in row order: `1` for fraudulent, `0` for legitimate.
/// Implementations are shared across concurrent requests, so they must be
/// safe for read-only use from several threads.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    fn predict(&self, rows: &ValidatedTable) -> Result<Vec<i64>, BoxError>;
}
