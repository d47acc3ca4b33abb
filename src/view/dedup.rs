//! Unordered-pair deduplication for aggregated edges

use std::collections::HashSet;

use crate::view::model::{AggregatedEdge, EntityId};

/// Outcome of offering a pair to an [`EdgeSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    Added,
    Duplicate,
    SelfLoop,
}

/// Set of unordered entity pairs that remembers insertion order
///
/// Pairs are keyed by their canonical `(min, max)` ordering, so `(a, b)` and
/// `(b, a)` are the same key. Rebuilt for every aggregation pass.
#[derive(Debug, Default, Clone)]
pub struct EdgeSet {
    seen: HashSet<AggregatedEdge>,
    order: Vec<AggregatedEdge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, a: EntityId, b: EntityId) -> Insert {
        let Some(edge) = AggregatedEdge::new(a, b) else {
            return Insert::SelfLoop;
        };
        if self.seen.insert(edge) {
            self.order.push(edge);
            Insert::Added
        } else {
            Insert::Duplicate
        }
    }

    pub fn contains(&self, a: EntityId, b: EntityId) -> bool {
        AggregatedEdge::new(a, b).map_or(false, |edge| self.seen.contains(&edge))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Edges in first-insertion order
    pub fn into_edges(self) -> Vec<AggregatedEdge> {
        self.order
    }
}
