//! Rating capability for arbitrary documents.
//!
//! [`RateableDoc`] decorates any [`Identified`] value with `rate`/`reset_rating`/`get_rating`/
//! `has_rating` bound to a store, and derefs to the wrapped value so its own API is untouched.
//! Each wrapper owns its document; wrappers only share the store they delegate to.

use std::ops::{Deref, DerefMut};

use super::error::RatingsResult;
use super::store::RatingsStore;
use super::types::{RawRating, Version};
use crate::persistence::RatingsPersistence;

/// Anything with a document id.
pub trait Identified {
    fn doc_id(&self) -> &str;
}

impl Identified for String {
    fn doc_id(&self) -> &str {
        self
    }
}

impl Identified for &str {
    fn doc_id(&self) -> &str {
        self
    }
}

impl<T: Identified + ?Sized> Identified for Box<T> {
    fn doc_id(&self) -> &str {
        (**self).doc_id()
    }
}

impl<T: Identified + ?Sized> Identified for std::sync::Arc<T> {
    fn doc_id(&self) -> &str {
        (**self).doc_id()
    }
}

/// A document plus the store its ratings live in.
pub struct RateableDoc<D, P: RatingsPersistence> {
    doc: D,
    store: RatingsStore<P>,
}

impl<D: Identified, P: RatingsPersistence> RateableDoc<D, P> {
    pub(crate) fn new(doc: D, store: RatingsStore<P>) -> Self {
        Self { doc, store }
    }

    /// Document id of the wrapped value.
    pub fn id(&self) -> &str {
        self.doc.doc_id()
    }

    pub async fn rate(&self, value: impl Into<RawRating>) -> RatingsResult<Version> {
        self.store.rate_document(self.doc.doc_id(), value).await
    }

    pub async fn reset_rating(&self) -> RatingsResult<Version> {
        self.store.reset_rating(self.doc.doc_id()).await
    }

    pub fn get_rating(&self) -> Option<f64> {
        self.store.get_rating(self.doc.doc_id())
    }

    pub fn has_rating(&self) -> bool {
        self.store.has_rating(self.doc.doc_id())
    }

    pub fn store(&self) -> &RatingsStore<P> {
        &self.store
    }

    pub fn inner(&self) -> &D {
        &self.doc
    }

    pub fn into_inner(self) -> D {
        self.doc
    }
}

impl<D, P: RatingsPersistence> Deref for RateableDoc<D, P> {
    type Target = D;

    fn deref(&self) -> &D {
        &self.doc
    }
}

impl<D, P: RatingsPersistence> DerefMut for RateableDoc<D, P> {
    fn deref_mut(&mut self) -> &mut D {
        &mut self.doc
    }
}

impl<D: Clone, P: RatingsPersistence> Clone for RateableDoc<D, P> {
    fn clone(&self) -> Self {
        Self {
            doc: self.doc.clone(),
            store: self.store.clone(),
        }
    }
}

impl<D: std::fmt::Debug, P: RatingsPersistence> std::fmt::Debug for RateableDoc<D, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateableDoc")
            .field("doc", &self.doc)
            .field("query", self.store.target())
            .finish()
    }
}
