//! Client-side ratings cache.
//!
//! - [`RatingsStore`]: per-query, versioned `doc_id -> rating` cache with single and bulk
//!   mutation through a [`RatingsPersistence`](crate::persistence::RatingsPersistence) backend.
//! - [`ranking`]: best-of-N selection shared by stores and merged snapshots.
//! - [`RateableDoc`]: decorator giving any identified document rating operations.

pub mod bulk;
pub mod error;
pub mod rateable;
pub mod ranking;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{RatingsError, RatingsResult};
pub use rateable::{Identified, RateableDoc};
pub use ranking::{RatingsSnapshot, best_docs};
pub use store::RatingsStore;
pub use types::{RankedDoc, Rating, RawRating, Version};
