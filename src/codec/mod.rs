//! Document-id transport codec.
//!
//! Document ids are opaque strings (URLs, file paths, slugs, numbers). To place one in a URL
//! path segment it is base64-encoded and then percent-encoded, but only when the literal would
//! be unsafe or ambiguous, so ordinary ids such as `doc1` stay readable on the wire.
//!
//! The wire format carries no flag saying whether a segment is encoded. The receiving side
//! decides with a heuristic (see [`decode_from_transport`]). Identifiers that are both valid
//! literals and valid encodings of another id are ambiguous by construction; the encoder avoids
//! producing them, but a new wire format should mark encoded segments explicitly.

pub mod error;


pub use error::EncodingError;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::{trace, warn};

/// Characters escaped in a path segment; matches `encodeURIComponent`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encodes a document id for use as a single URL path segment.
///
/// Bare tokens (ASCII letters, digits, `-`, `_`) are returned unchanged unless the decode
/// heuristic would misread them as an encoded id. Everything else is base64-encoded and then
/// percent-encoded, e.g. `file://foo/bar` becomes `ZmlsZTovL2Zvby9iYXI%3D`.
pub fn encode_for_transport(id: &str) -> String {
    if is_bare_token(id) && !reads_as_encoded(id) {
        return id.to_string();
    }

    match encode_lossless(id) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!(error = %e, "Falling back to literal transport for document id");
            utf8_percent_encode(id, PATH_SEGMENT).to_string()
        }
    }
}

/// Path-segment form of `id`, or `None` when it has no non-empty segment form.
///
/// Only the empty id lacks one: its base64 form is empty too, and an empty segment does not
/// address a resource. Callers send such ids in a request body instead.
pub fn path_segment_for(id: &str) -> Option<String> {
    if id.is_empty() {
        None
    } else {
        Some(encode_for_transport(id))
    }
}

/// Decodes a path segment produced by [`encode_for_transport`].
///
/// After percent-decoding, the segment is read as an encoded id iff
/// (it is not a plain number AND it round-trips through strict base64) OR its decoded form
/// contains a period. Any decoding failure leaves the segment as a literal id.
pub fn decode_from_transport(segment: &str) -> String {
    let segment = match percent_decode(segment) {
        Ok(s) => s,
        Err(e) => {
            trace!(error = %e, "Segment kept verbatim");
            segment.to_string()
        }
    };

    match decode_encoded_form(&segment) {
        Ok(Some(decoded)) => decoded,
        Ok(None) => segment,
        Err(e) => {
            trace!(error = %e, "Segment treated as literal document id");
            segment
        }
    }
}

/// Returns `true` if `segment` (already percent-decoded) would be decoded as an encoded id.
pub fn is_transport_encoded(segment: &str) -> bool {
    reads_as_encoded(segment)
}

fn encode_lossless(id: &str) -> Result<String, EncodingError> {
    let encoded = STANDARD.encode(id.as_bytes());
    match decode_encoded_form(&encoded) {
        Ok(Some(decoded)) if decoded == id => Ok(utf8_percent_encode(&encoded, PATH_SEGMENT).to_string()),
        _ => Err(EncodingError::Unrepresentable {
            id: id.to_string(),
            encoded,
        }),
    }
}

fn reads_as_encoded(segment: &str) -> bool {
    matches!(decode_encoded_form(segment), Ok(Some(_)))
}

/// `Ok(Some(id))` if the heuristic accepts `segment` as encoded, `Ok(None)` if it is a literal.
fn decode_encoded_form(segment: &str) -> Result<Option<String>, EncodingError> {
    let bytes = STANDARD
        .decode(segment)
        .map_err(|e| EncodingError::InvalidBase64 {
            reason: e.to_string(),
        })?;
    let decoded = String::from_utf8(bytes).map_err(|_| EncodingError::NotUtf8)?;

    let round_trips = STANDARD.encode(decoded.as_bytes()) == segment;
    if (!is_numeric(segment) && round_trips) || decoded.contains('.') {
        Ok(Some(decoded))
    } else {
        Ok(None)
    }
}

fn percent_decode(segment: &str) -> Result<String, EncodingError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| EncodingError::InvalidPercentEncoding)
}

fn is_bare_token(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Plain-number check. Requires a digit so `inf`/`NaN` spellings stay non-numeric.
fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    s.bytes().any(|b| b.is_ascii_digit()) && s.parse::<f64>().is_ok()
}
