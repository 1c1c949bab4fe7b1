//! Best-of-N selection over ratings snapshots.
//!
//! The same tie-break applies whatever produced the snapshot (one store or several merged):
//! rating descending, then insertion order.

use std::collections::HashMap;

use super::types::{RankedDoc, Rating};

/// Returns up to `n` rated documents, highest rating first.
///
/// Unrated entries are skipped. Ties keep the input order (stable sort). Asking for more than
/// the number of rated documents returns all of them.
pub fn best_docs<'a, I>(ratings: I, n: usize) -> Vec<RankedDoc>
where
    I: IntoIterator<Item = &'a Rating>,
{
    let mut rated: Vec<RankedDoc> = ratings
        .into_iter()
        .filter_map(|r| {
            r.value.map(|rating| RankedDoc {
                id: r.doc_id.clone(),
                rating,
                query_id: r.query_id,
            })
        })
        .collect();

    rated.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    rated.truncate(n);
    rated
}

/// Point-in-time, insertion-ordered copy of one or more stores' ratings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingsSnapshot {
    entries: Vec<Rating>,
    positions: HashMap<(u64, String), usize>,
}

impl RatingsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rating, or replaces the value of an existing (query, doc) entry in place.
    pub fn push(&mut self, rating: Rating) {
        let key = (rating.query_id, rating.doc_id.clone());
        match self.positions.get(&key) {
            Some(&idx) => self.entries[idx].value = rating.value,
            None => {
                self.positions.insert(key, self.entries.len());
                self.entries.push(rating);
            }
        }
    }

    /// Folds `other` into `self`: existing entries keep their position and take `other`'s
    /// value; new entries are appended in `other`'s order.
    pub fn merge(&mut self, other: RatingsSnapshot) {
        for rating in other.entries {
            self.push(rating);
        }
    }

    /// See [`best_docs`].
    pub fn best_docs(&self, n: usize) -> Vec<RankedDoc> {
        best_docs(&self.entries, n)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rating> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rated_count(&self) -> usize {
        self.entries.iter().filter(|r| r.is_rated()).count()
    }
}

impl FromIterator<Rating> for RatingsSnapshot {
    fn from_iter<T: IntoIterator<Item = Rating>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for rating in iter {
            snapshot.push(rating);
        }
        snapshot
    }
}
