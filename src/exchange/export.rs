//! Ratings export in the three supported representations.

use std::str::FromStr;

use serde::Serialize;

use super::error::{ExchangeError, ExchangeResult};
use super::model::{CaseSnapshot, StoredRating};
use crate::convert::{
    JudgmentTree, LtrRow, RatingLabel, RreDocument, RreMetadata, render_ltr,
    to_external_judgment_document,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Rre,
    Ltr,
}

impl ExportFormat {
    /// Resolves the `file_format` and legacy `format` query parameters.
    ///
    /// `file_format` wins when both are given; `format=txt` selects LTR.
    pub fn from_params(file_format: Option<&str>, format: Option<&str>) -> ExchangeResult<Self> {
        match (file_format, format) {
            (Some(name), _) => name.parse(),
            (None, Some("txt")) => Ok(ExportFormat::Ltr),
            (None, Some("json")) | (None, None) => Ok(ExportFormat::Json),
            (None, Some(other)) => Err(unsupported(other)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "rre" => Ok(ExportFormat::Rre),
            "ltr" | "txt" => Ok(ExportFormat::Ltr),
            other => Err(unsupported(other)),
        }
    }
}

fn unsupported(format: &str) -> ExchangeError {
    ExchangeError::UnsupportedFormat {
        direction: "export",
        format: format.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonExport {
    pub queries: Vec<JsonExportQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonExportQuery {
    pub query: String,
    pub query_id: u64,
    /// Ratings in stored order.
    pub ratings: Vec<StoredRating>,
}

/// `{"queries": [{"query", "query_id", "ratings": [{"doc_id", "rating"}]}]}`.
pub fn export_json(case: &CaseSnapshot) -> JsonExport {
    let queries = case
        .queries
        .iter()
        .map(|query| JsonExportQuery {
            query: query.query_text.clone(),
            query_id: query.query_id,
            ratings: query.ratings.clone(),
        })
        .collect();
    JsonExport { queries }
}

/// RRE document of the case; queries without ratings are still listed.
///
/// `index` is the case's index name, or `default_index` when the case has none.
pub fn export_rre(case: &CaseSnapshot, id_field: &str, default_index: &str) -> RreDocument {
    let mut tree = JudgmentTree::new();
    for query in &case.queries {
        let entry = tree.insert_query(&query.query_text);
        for rating in &query.ratings {
            entry.insert(RatingLabel::from_f64(rating.rating), rating.doc_id.clone());
        }
    }

    let index = case
        .index_name
        .clone()
        .unwrap_or_else(|| default_index.to_string());
    to_external_judgment_document(
        &tree,
        RreMetadata {
            id_field: id_field.to_string(),
            index,
        },
    )
}

/// LTR text, one line per rating, keyed by query id.
pub fn export_ltr(case: &CaseSnapshot) -> String {
    render_ltr(case.queries.iter().flat_map(|query| {
        query.ratings.iter().map(move |rating| LtrRow {
            rating: rating.rating,
            query_id: query.query_id,
            doc_id: &rating.doc_id,
            query_text: &query.query_text,
        })
    }))
}
