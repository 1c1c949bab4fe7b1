use thiserror::Error;

/// Reasons a document identifier could not be moved through the transport encoding.
///
/// These never reach callers of [`encode_for_transport`](super::encode_for_transport) or
/// [`decode_from_transport`](super::decode_from_transport): both degrade to the literal
/// identifier and log the error instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// The segment is not valid base64 under the strict (padded, canonical) alphabet.
    #[error("segment is not strict base64: {reason}")]
    InvalidBase64 {
        /// Decoder message.
        reason: String,
    },

    /// The decoded bytes are not UTF-8, so they cannot be a document id.
    #[error("decoded segment is not valid UTF-8")]
    NotUtf8,

    /// The percent-decoded segment is not valid UTF-8.
    #[error("percent-decoded segment is not valid UTF-8")]
    InvalidPercentEncoding,

    /// The encoded form would be read back as a literal, so the id has no lossless encoding.
    #[error("identifier '{id}' encodes to '{encoded}', which decodes as a literal")]
    Unrepresentable {
        /// Raw identifier.
        id: String,
        /// Base64 form that failed the decode heuristic.
        encoded: String,
    },
}
