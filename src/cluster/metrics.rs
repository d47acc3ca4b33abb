//! Category statistics for clusters and components

use serde::{Deserialize, Serialize};

use crate::graph::GraphNode;

/// Which per-node value decides a node's category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    #[default]
    Prediction,
    /// Ground-truth label for nodes whose label was known, prediction otherwise
    GroundTruth,
}

/// One slice of a category breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub category: usize,

    /// Category index normalized by the class count, for palette lookup
    pub color: f64,

    /// Share of the entity in percent
    pub percent: f64,
}

/// Category of a single node under the given source
pub fn category_of(node: &GraphNode, source: CategorySource) -> usize {
    match source {
        CategorySource::GroundTruth if node.known_label => node.label,
        _ => node.prediction,
    }
}

/// Count categories among `nodes`, growing past `nclass` if a node is out of range
pub fn histogram<'a, I>(nodes: I, nclass: usize, source: CategorySource) -> Vec<usize>
where
    I: IntoIterator<Item = &'a GraphNode>,
{
    let mut counts = vec![0usize; nclass];
    for node in nodes {
        let category = category_of(node, source);
        if category >= counts.len() {
            counts.resize(category + 1, 0);
        }
        counts[category] += 1;
    }
    counts
}

/// Index of the largest count; ties go to the lowest index
pub fn dominant_category(histogram: &[usize]) -> usize {
    let mut best = 0;
    for (category, &count) in histogram.iter().enumerate() {
        if count > histogram[best] {
            best = category;
        }
    }
    best
}

/// Proportions of every present category, ascending by category
pub fn pie_breakdown(histogram: &[usize], nclass: usize) -> Vec<PieSlice> {
    let total: usize = histogram.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    histogram
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(category, &count)| PieSlice {
            category,
            color: normalized_color(category, nclass),
            percent: 100.0 * count as f64 / total as f64,
        })
        .collect()
}

/// Breakdown of a single node: one full slice
pub fn single_slice(category: usize, nclass: usize) -> Vec<PieSlice> {
    vec![PieSlice {
        category,
        color: normalized_color(category, nclass),
        percent: 100.0,
    }]
}

fn normalized_color(category: usize, nclass: usize) -> f64 {
    if nclass == 0 {
        return 0.0;
    }
    category as f64 / nclass as f64
}
