use serde::{Deserialize, Serialize};

/// Opaque change marker for a ratings store.
///
/// Strictly increases on every committed mutation; carries no other meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version(u64);

impl Version {
    #[inline]
    pub(crate) fn next(self) -> Self {
        Version(self.0 + 1)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A rating as it arrives from a caller or a seed mapping, before numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Number(f64),
    Text(String),
}

impl RawRating {
    /// Returns the numeric value, parsing text (`"10"` → `10.0`). `None` if not a finite number.
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            RawRating::Number(n) => *n,
            RawRating::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl std::fmt::Display for RawRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawRating::Number(n) => write!(f, "{}", n),
            RawRating::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawRating {
    fn from(value: f64) -> Self {
        RawRating::Number(value)
    }
}

impl From<i32> for RawRating {
    fn from(value: i32) -> Self {
        RawRating::Number(f64::from(value))
    }
}

impl From<&str> for RawRating {
    fn from(value: &str) -> Self {
        RawRating::Text(value.to_string())
    }
}

impl From<String> for RawRating {
    fn from(value: String) -> Self {
        RawRating::Text(value)
    }
}

/// A (query, document) judgment. `value == None` means unrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub query_id: u64,
    pub doc_id: String,
    pub value: Option<f64>,
}

impl Rating {
    #[inline]
    pub fn is_rated(&self) -> bool {
        self.value.is_some()
    }
}

/// One entry of a best-documents ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDoc {
    pub id: String,
    pub rating: f64,
    pub query_id: u64,
}
