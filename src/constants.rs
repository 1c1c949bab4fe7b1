//! Cross-cutting, shared constants.

/// Prefix the gateway mounts the ratings API under.
pub const API_PREFIX: &str = "/api";

/// `id_field` of exported RRE documents unless configured otherwise.
pub const DEFAULT_ID_FIELD: &str = "id";

/// RRE `index` for cases without an index name unless configured otherwise.
pub const DEFAULT_INDEX_NAME: &str = "default";

/// Message of a successful import response.
pub const IMPORT_SUCCESS_MESSAGE: &str = "Success!";

/// Content type of the LTR export.
pub const LTR_CONTENT_TYPE: &str = "text/plain";
