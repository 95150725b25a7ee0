pub mod classifier;
pub mod engine;
pub mod logistic;
pub mod types;

pub use classifier::{BoxError, Classifier};
pub use engine::{ScoringEngine, ScoringError};
pub use logistic::LogisticClassifier;
pub use types::{FraudReport, Label, RowVerdict};
