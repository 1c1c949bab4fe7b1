//! RRE judgment documents.
//!
//! ```json
//! {
//!   "id_field": "id",
//!   "index": "products",
//!   "queries": [
//!     { "placeholders": { "$query": "cat" }, "relevant_documents": { "1": ["docA"] } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{FormatError, FormatResult, Location};
use super::model::RatingLabel;
use super::tree::JudgmentTree;

/// Envelope fields of an exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RreMetadata {
    pub id_field: String,
    pub index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RrePlaceholders {
    #[serde(rename = "$query")]
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RreQuery {
    pub placeholders: RrePlaceholders,
    pub relevant_documents: BTreeMap<RatingLabel, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RreDocument {
    pub id_field: String,
    pub index: String,
    pub queries: Vec<RreQuery>,
}

/// Builds the external document for `tree`, one query entry per tree query.
pub fn to_external_judgment_document(tree: &JudgmentTree, metadata: RreMetadata) -> RreDocument {
    let queries = tree
        .queries()
        .iter()
        .map(|query| RreQuery {
            placeholders: RrePlaceholders {
                query: query.query_text.clone(),
            },
            relevant_documents: query.buckets.clone(),
        })
        .collect();

    RreDocument {
        id_field: metadata.id_field,
        index: metadata.index,
        queries,
    }
}

/// Parses JSON text, then [`parse_rre_document`].
pub fn parse_rre_text(text: &str) -> FormatResult<JudgmentTree> {
    let value: Value = serde_json::from_str(text).map_err(|e| FormatError::InvalidJson {
        message: e.to_string(),
    })?;
    parse_rre_document(&value)
}

/// Reads the `queries` of an RRE document into a tree.
///
/// Only `placeholders.$query` and `relevant_documents` are read; other fields are ignored.
/// Document ids may be strings or numbers.
pub fn parse_rre_document(value: &Value) -> FormatResult<JudgmentTree> {
    let root = value.as_object().ok_or(FormatError::InvalidField {
        field: "root",
        expected: "an object",
        location: Location::Root,
    })?;

    let queries = root
        .get("queries")
        .ok_or(FormatError::MissingField {
            field: "queries",
            location: Location::Root,
        })?
        .as_array()
        .ok_or(FormatError::InvalidField {
            field: "queries",
            expected: "an array",
            location: Location::Root,
        })?;

    let mut tree = JudgmentTree::new();
    for (index, entry) in queries.iter().enumerate() {
        read_query(&mut tree, index, entry)?;
    }
    Ok(tree)
}

fn read_query(tree: &mut JudgmentTree, index: usize, entry: &Value) -> FormatResult<()> {
    let unnamed = Location::Query {
        index,
        query_text: None,
    };

    let entry = entry.as_object().ok_or_else(|| FormatError::InvalidField {
        field: "queries[]",
        expected: "an object",
        location: unnamed.clone(),
    })?;

    let placeholders = object_field(entry, "placeholders", &unnamed)?;
    let query_text = placeholders
        .get("$query")
        .ok_or_else(|| FormatError::MissingField {
            field: "placeholders.$query",
            location: unnamed.clone(),
        })?
        .as_str()
        .ok_or_else(|| FormatError::InvalidField {
            field: "placeholders.$query",
            expected: "a string",
            location: unnamed.clone(),
        })?;

    let named = Location::Query {
        index,
        query_text: Some(query_text.to_string()),
    };
    let relevant = object_field(entry, "relevant_documents", &named)?;

    let query = tree.insert_query(query_text);
    for (label, doc_ids) in relevant {
        let doc_ids = doc_ids.as_array().ok_or_else(|| FormatError::InvalidField {
            field: "relevant_documents",
            expected: "a map of rating to document id arrays",
            location: named.clone(),
        })?;
        for doc_id in doc_ids {
            let doc_id = scalar_text(doc_id).ok_or_else(|| FormatError::InvalidField {
                field: "relevant_documents",
                expected: "document ids that are strings or numbers",
                location: named.clone(),
            })?;
            query.insert(RatingLabel::new(label.as_str()), doc_id);
        }
    }
    Ok(())
}

fn object_field<'a>(
    entry: &'a Map<String, Value>,
    field: &'static str,
    location: &Location,
) -> FormatResult<&'a Map<String, Value>> {
    entry
        .get(field)
        .ok_or_else(|| FormatError::MissingField {
            field,
            location: location.clone(),
        })?
        .as_object()
        .ok_or_else(|| FormatError::InvalidField {
            field,
            expected: "an object",
            location: location.clone(),
        })
}

pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
