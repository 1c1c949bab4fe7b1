//! Ratings import.
//!
//! Both formats are normalized to a flat judgment list, every label is read as a number, and
//! only then is the repository touched. A bad payload therefore never clears anything.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use tracing::{instrument, warn};

use super::error::{ExchangeError, ExchangeResult};
use super::model::{ImportSummary, ImportedRating};
use super::repository::RatingsRepository;
use crate::convert::{Judgment, parse_judgment_list, parse_rre_document, parse_rre_text};

/// Accepted `file_format` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportFormat {
    /// Flat `ratings` list.
    #[default]
    Hash,
    /// RRE document in `rre_json`.
    Rre,
}

impl ImportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportFormat::Hash => "hash",
            ImportFormat::Rre => "rre",
        }
    }
}

impl FromStr for ImportFormat {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hash" => Ok(ImportFormat::Hash),
            "rre" => Ok(ImportFormat::Rre),
            other => Err(ExchangeError::UnsupportedFormat {
                direction: "import",
                format: other.to_string(),
            }),
        }
    }
}

/// Body of `POST /api/cases/{case_id}/import/ratings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub file_format: Option<String>,
    #[serde(default)]
    pub ratings: Option<Value>,
    /// JSON text or an already-parsed object.
    #[serde(default)]
    pub rre_json: Option<Value>,
    #[serde(default)]
    pub clear_queries: bool,
}

impl ImportRequest {
    pub fn format(&self) -> ExchangeResult<ImportFormat> {
        match self.file_format.as_deref() {
            None => Ok(ImportFormat::default()),
            Some(name) => name.parse(),
        }
    }

    /// Flat judgment list carried by the request, whatever its format.
    pub fn judgments(&self) -> ExchangeResult<Vec<Judgment>> {
        match self.format()? {
            ImportFormat::Hash => {
                let ratings = self.ratings.as_ref().ok_or(ExchangeError::MissingPayload {
                    field: "ratings",
                    format: "hash",
                })?;
                Ok(parse_judgment_list(ratings)?)
            }
            ImportFormat::Rre => {
                let payload = self.rre_json.as_ref().ok_or(ExchangeError::MissingPayload {
                    field: "rre_json",
                    format: "rre",
                })?;
                let tree = match payload {
                    Value::String(text) => parse_rre_text(text)?,
                    other => parse_rre_document(other)?,
                };
                Ok(tree.flatten())
            }
        }
    }
}

/// Reads every label as a number; the first non-numeric label fails the whole list.
pub fn to_imported_ratings(judgments: Vec<Judgment>) -> ExchangeResult<Vec<ImportedRating>> {
    judgments
        .into_iter()
        .map(|judgment| match judgment.rating.as_f64() {
            Some(rating) => Ok(ImportedRating {
                query_text: judgment.query_text,
                doc_id: judgment.doc_id,
                rating,
            }),
            None => Err(ExchangeError::InvalidRatingLabel {
                label: judgment.rating.to_string(),
                query_text: judgment.query_text,
                doc_id: judgment.doc_id,
            }),
        })
        .collect()
}

/// Validates `request` and writes its ratings into `case_id`.
#[instrument(skip(repository, request), fields(format = ?request.file_format, clear = request.clear_queries))]
pub async fn import_ratings(
    repository: &dyn RatingsRepository,
    case_id: u64,
    request: &ImportRequest,
) -> ExchangeResult<ImportSummary> {
    let ratings = request
        .judgments()
        .and_then(to_imported_ratings)
        .inspect_err(|e| warn!(case_id, error = %e, "Import rejected"))?;

    repository
        .import_ratings(case_id, ratings, request.clear_queries)
        .await
}
