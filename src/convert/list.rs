//! Flat judgment lists (`[{query_text, doc_id, rating}, ...]`).

use serde_json::Value;

use super::error::{FormatError, FormatResult, Location};
use super::model::{Judgment, RatingLabel};
use super::rre::scalar_text;

/// Reads a flat list, reporting the index of the first bad record.
///
/// Duplicates pass through. `doc_id` and `rating` accept strings or numbers.
pub fn parse_judgment_list(value: &Value) -> FormatResult<Vec<Judgment>> {
    let records = value.as_array().ok_or(FormatError::InvalidField {
        field: "ratings",
        expected: "an array",
        location: Location::Root,
    })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| read_record(index, record))
        .collect()
}

fn read_record(index: usize, record: &Value) -> FormatResult<Judgment> {
    let location = Location::Record { index };
    let record = record.as_object().ok_or_else(|| FormatError::InvalidField {
        field: "ratings[]",
        expected: "an object",
        location: location.clone(),
    })?;

    let field = |name: &'static str| -> FormatResult<String> {
        let value = record.get(name).ok_or_else(|| FormatError::MissingField {
            field: name,
            location: location.clone(),
        })?;
        scalar_text(value).ok_or_else(|| FormatError::InvalidField {
            field: name,
            expected: "a string or number",
            location: location.clone(),
        })
    };

    Ok(Judgment {
        query_text: field("query_text")?,
        doc_id: field("doc_id")?,
        rating: RatingLabel::new(field("rating")?),
    })
}
