//! Persistence collaborator for the ratings cache.
//!
//! The store talks to durable storage only through [`RatingsPersistence`]. [`HttpPersistence`]
//! speaks the ratings API (see [`paths`]); `MockPersistence` records requests in-process.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod paths;

#[cfg(test)]
mod tests;

pub use client::{HttpPersistence, RatingsPersistence};
pub use error::{PersistenceError, PersistenceResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockPersistence, RecordedRequest};
pub use model::{BulkDeleteBody, BulkRatingBody, QueryTarget, RatingBody, RequestMethod};
pub use paths::{bulk_delete_path, bulk_ratings_path, rating_path};
