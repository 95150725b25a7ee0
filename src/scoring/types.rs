use serde::Serialize;
use std::fmt;

/// Outcome for a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    Legitimate,
    Fraudulent,
}

impl Label {
    /// Permissive mapping: only `1` is fraud, every other value is legitimate.
    pub fn from_raw(raw: i64) -> Self {
        if raw == 1 {
            Self::Fraudulent
        } else {
            Self::Legitimate
        }
    }

    /// Strict mapping: `None` for anything outside {0, 1}.
    pub fn try_from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::Legitimate),
            1 => Some(Self::Fraudulent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legitimate => "Legitimate",
            Self::Fraudulent => "Fraudulent",
        }
    }

    pub fn is_fraudulent(&self) -> bool {
        matches!(self, Self::Fraudulent)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label paired with the 1-based position of its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowVerdict {
    pub index: usize,
    pub label: Label,
}

/// Labels for every scored row plus the rows flagged as fraudulent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FraudReport {
    predictions: Vec<RowVerdict>,
    fraudulent_indices: Vec<usize>,
}

impl FraudReport {
    pub fn from_labels(labels: impl IntoIterator<Item = Label>) -> Self {
        let predictions: Vec<RowVerdict> = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| RowVerdict { index: i + 1, label })
            .collect();
        let fraudulent_indices = predictions
            .iter()
            .filter(|v| v.label.is_fraudulent())
            .map(|v| v.index)
            .collect();

        Self {
            predictions,
            fraudulent_indices,
        }
    }

    pub fn predictions(&self) -> &[RowVerdict] {
        &self.predictions
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.predictions.iter().map(|v| v.label)
    }

    /// Ascending 1-based indices of fraudulent rows.
    pub fn fraudulent_indices(&self) -> &[usize] {
        &self.fraudulent_indices
    }

    pub fn has_fraud(&self) -> bool {
        !self.fraudulent_indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.fraudulent_indices.is_empty() {
            return "No fraudulent transactions detected.".to_string();
        }
        let indices: Vec<String> = self
            .fraudulent_indices
            .iter()
            .map(|i| i.to_string())
            .collect();
        format!("Transactions {} are fraudulent.", indices.join(", "))
    }
}

impl fmt::Display for FraudReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predictions:")?;
        for verdict in &self.predictions {
            writeln!(f, "Transaction {}: {}", verdict.index, verdict.label)?;
        }
        if self.has_fraud() {
            writeln!(f, "Fraudulent Transactions:")?;
        }
        write!(f, "{}", self.summary())
    }
}
