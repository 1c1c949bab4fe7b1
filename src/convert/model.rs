use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A rating value as carried by exchange formats.
///
/// Labels stay text so the converter never rounds or reformats them; numeric interpretation
/// happens at import time via [`RatingLabel::as_f64`]. JSON numbers and strings both
/// deserialize into a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LabelRepr", into = "String")]
pub struct RatingLabel(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Text(String),
    Number(serde_json::Number),
}

impl From<LabelRepr> for RatingLabel {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::Text(s) => RatingLabel(s),
            LabelRepr::Number(n) => RatingLabel(n.to_string()),
        }
    }
}

impl From<RatingLabel> for String {
    fn from(label: RatingLabel) -> Self {
        label.0
    }
}

impl RatingLabel {
    pub fn new(label: impl Into<String>) -> Self {
        RatingLabel(label.into())
    }

    /// Label for a stored numeric rating. Whole numbers render without a fraction (`3`, not `3.0`).
    pub fn from_f64(value: f64) -> Self {
        RatingLabel(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the label, if it is a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

impl std::fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RatingLabel {
    fn from(value: &str) -> Self {
        RatingLabel::new(value)
    }
}

/// Natural order: numeric labels first by value, then the rest lexicographically.
/// Text breaks ties between numerically equal labels (`"1"` and `"1.0"`).
impl Ord for RatingLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for RatingLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One row of a flat judgment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub query_text: String,
    pub doc_id: String,
    pub rating: RatingLabel,
}

impl Judgment {
    pub fn new(
        query_text: impl Into<String>,
        doc_id: impl Into<String>,
        rating: impl Into<RatingLabel>,
    ) -> Self {
        Self {
            query_text: query_text.into(),
            doc_id: doc_id.into(),
            rating: rating.into(),
        }
    }
}
