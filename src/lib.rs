//! Judgment library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Client-side ratings cache
//! - [`RatingsStore`] - versioned per-query `doc_id -> rating` cache with single and bulk mutation
//! - [`RateableDoc`], [`Identified`] - rating capability for arbitrary documents
//! - [`RatingsSnapshot`], [`best_docs`] - best-of-N selection
//! - [`RatingsPersistence`], [`HttpPersistence`] - the durable side of a store
//!
//! ## Document identity
//! - [`encode_for_transport`], [`decode_from_transport`] - path-safe document ids
//!
//! ## Exchange formats
//! - [`Judgment`], [`JudgmentTree`] - flat and hierarchical judgments
//! - [`RreDocument`], [`render_ltr`] - RRE and LTR representations
//!
//! ## Server
//! - [`exchange`] - ratings repository, import and export
//! - [`gateway`] - Axum router over the repository
//! - [`Config`], [`ConfigError`] - environment configuration
//!
//! ## Test/Mock Support
//! [`MockPersistence`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod codec;
pub mod config;
pub mod constants;
pub mod convert;
pub mod exchange;
pub mod gateway;
pub mod persistence;
pub mod ratings;

pub use codec::{
    EncodingError, decode_from_transport, encode_for_transport, is_transport_encoded,
    path_segment_for,
};
pub use config::{Config, ConfigError};
pub use convert::{
    FormatError, Judgment, JudgmentTree, RatingLabel, RreDocument, RreMetadata, flatten,
    parse_judgment_list, parse_rre_document, render_ltr, to_external_judgment_document, unflatten,
};
pub use exchange::{
    ExchangeError, ImportRequest, MemoryRatingsRepository, RatingsRepository,
};
pub use gateway::{AppState, GatewayError, create_router};
#[cfg(any(test, feature = "mock"))]
pub use persistence::MockPersistence;
pub use persistence::{HttpPersistence, PersistenceError, QueryTarget, RatingsPersistence};
pub use ratings::{
    Identified, RankedDoc, RateableDoc, Rating, RatingsError, RatingsSnapshot, RatingsStore,
    RawRating, Version, best_docs,
};
