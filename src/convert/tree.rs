//! Hierarchical judgments: query text, then rating label, then document ids.

use std::collections::{BTreeMap, HashMap};

use super::model::{Judgment, RatingLabel};

/// Judgments of one query, bucketed by rating label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryJudgments {
    pub query_text: String,
    pub buckets: BTreeMap<RatingLabel, Vec<String>>,
}

impl QueryJudgments {
    fn new(query_text: String) -> Self {
        Self {
            query_text,
            buckets: BTreeMap::new(),
        }
    }

    /// Adds `doc_id` to the `label` bucket; a document already in the bucket is not repeated.
    pub fn insert(&mut self, label: RatingLabel, doc_id: String) {
        let bucket = self.buckets.entry(label).or_default();
        if !bucket.contains(&doc_id) {
            bucket.push(doc_id);
        }
    }

    /// Number of (label, doc) pairs.
    pub fn judgment_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// `query_text -> rating -> doc ids`, with queries in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JudgmentTree {
    queries: Vec<QueryJudgments>,
    index: HashMap<String, usize>,
}

impl JudgmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `query_text`, creating it at the end if absent.
    pub fn insert_query(&mut self, query_text: &str) -> &mut QueryJudgments {
        let idx = match self.index.get(query_text) {
            Some(&idx) => idx,
            None => {
                let idx = self.queries.len();
                self.index.insert(query_text.to_string(), idx);
                self.queries.push(QueryJudgments::new(query_text.to_string()));
                idx
            }
        };
        &mut self.queries[idx]
    }

    pub fn insert(&mut self, query_text: &str, label: RatingLabel, doc_id: impl Into<String>) {
        self.insert_query(query_text).insert(label, doc_id.into());
    }

    pub fn get(&self, query_text: &str) -> Option<&QueryJudgments> {
        self.index.get(query_text).map(|&idx| &self.queries[idx])
    }

    pub fn queries(&self) -> &[QueryJudgments] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Total number of (query, label, doc) triples.
    pub fn judgment_count(&self) -> usize {
        self.queries.iter().map(QueryJudgments::judgment_count).sum()
    }

    /// Flat list in query order, then label order, then bucket order.
    pub fn flatten(&self) -> Vec<Judgment> {
        let mut out = Vec::with_capacity(self.judgment_count());
        for query in &self.queries {
            for (label, doc_ids) in &query.buckets {
                out.extend(doc_ids.iter().map(|doc_id| Judgment {
                    query_text: query.query_text.clone(),
                    doc_id: doc_id.clone(),
                    rating: label.clone(),
                }));
            }
        }
        out
    }

    /// Groups a flat list. Duplicate (query, rating, doc) triples collapse into one.
    pub fn unflatten<'a, I>(judgments: I) -> Self
    where
        I: IntoIterator<Item = &'a Judgment>,
    {
        let mut tree = Self::new();
        for judgment in judgments {
            tree.insert(
                &judgment.query_text,
                judgment.rating.clone(),
                judgment.doc_id.clone(),
            );
        }
        tree
    }
}

impl FromIterator<Judgment> for JudgmentTree {
    fn from_iter<T: IntoIterator<Item = Judgment>>(iter: T) -> Self {
        let mut tree = Self::new();
        for judgment in iter {
            tree.insert(&judgment.query_text, judgment.rating, judgment.doc_id);
        }
        tree
    }
}

/// See [`JudgmentTree::flatten`].
pub fn flatten(tree: &JudgmentTree) -> Vec<Judgment> {
    tree.flatten()
}

/// See [`JudgmentTree::unflatten`].
pub fn unflatten(judgments: &[Judgment]) -> JudgmentTree {
    JudgmentTree::unflatten(judgments)
}
