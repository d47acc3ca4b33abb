//! Graph construction module

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::cluster::metrics::CategorySource;
use crate::cluster::{Cluster, ClusterId, Component, ComponentId};
use crate::error::{Result, ViewError};
use crate::graph::compressed::LinkTable;
use crate::graph::input::InputNode;
use crate::graph::{ClusterGraph, GraphNode, NodeId};

/// Records dropped while building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Nodes without any cluster membership
    pub skipped_nodes: usize,

    /// Nodes whose id was already taken
    pub duplicate_nodes: usize,

    /// Links referencing an unknown node
    pub skipped_links: usize,

    /// Cluster members whose component differs from the cluster's first member
    pub mixed_component_members: usize,
}

/// Builder for incrementally constructing a ClusterGraph
pub struct GraphBuilder {
    /// Mapping from node ids to node indices
    id_to_index: HashMap<NodeId, u32>,

    /// Accepted nodes in insertion order
    nodes: Vec<GraphNode>,

    /// Outgoing links for each node
    adjacency_lists: Vec<Vec<u32>>,

    stats: BuildStats,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            stats: BuildStats::default(),
        }
    }

    /// Add a node; returns its index, or `None` when the record is rejected
    pub fn add_node(&mut self, input: &InputNode) -> Option<u32> {
        if input.group.is_empty() {
            log::warn!("Skipping node {}: no cluster membership", input.id);
            self.stats.skipped_nodes += 1;
            return None;
        }
        if self.id_to_index.contains_key(&input.id) {
            log::warn!("Skipping duplicate node id {}", input.id);
            self.stats.duplicate_nodes += 1;
            return None;
        }

        let mut clusters = Vec::with_capacity(input.group.len());
        for &g in &input.group {
            if !clusters.contains(&g) {
                clusters.push(g);
            }
        }

        let idx = self.nodes.len() as u32;
        self.id_to_index.insert(input.id, idx);
        self.nodes.push(GraphNode {
            id: input.id,
            prediction: input.prediction,
            label: input.label,
            known_label: input.known_label,
            clusters,
            component_id: input.cid,
            error_est: input.error_est,
        });
        self.adjacency_lists.push(Vec::new());

        Some(idx)
    }

    /// Add a link between two known nodes; unknown endpoints drop the link
    pub fn add_link(&mut self, src_id: NodeId, dst_id: NodeId) -> bool {
        let (Some(&src_idx), Some(&dst_idx)) = (self.id_to_index.get(&src_id), self.id_to_index.get(&dst_id)) else {
            log::warn!("Skipping link {} -> {}: unknown endpoint", src_id, dst_id);
            self.stats.skipped_links += 1;
            return false;
        };
        self.adjacency_lists[src_idx as usize].push(dst_idx);
        true
    }

    /// Build the cluster graph
    pub fn build(mut self) -> Result<ClusterGraph> {
        if self.nodes.is_empty() {
            return Err(ViewError::EmptyGraph);
        }

        let nclass = self
            .nodes
            .iter()
            .map(|n| n.prediction.max(n.label) + 1)
            .max()
            .unwrap_or(0);

        // Clusters in ascending id order, members in node order
        let mut clusters: BTreeMap<ClusterId, Cluster> = BTreeMap::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            for &g in &node.clusters {
                let cluster = clusters.entry(g).or_insert_with(|| Cluster {
                    id: g,
                    members: Vec::new(),
                    component_id: node.component_id,
                });
                if cluster.component_id != node.component_id {
                    log::debug!(
                        "Node {} in cluster {} has component {}, cluster uses {}",
                        node.id,
                        g,
                        node.component_id,
                        cluster.component_id
                    );
                    self.stats.mixed_component_members += 1;
                }
                cluster.members.push(idx);
            }
        }

        let mut components: BTreeMap<ComponentId, Component> = BTreeMap::new();
        for node in &self.nodes {
            components
                .entry(node.component_id)
                .or_insert_with(|| Component {
                    id: node.component_id,
                    clusters: Vec::new(),
                    size: 0,
                    histogram: Vec::new(),
                    dominant: 0,
                })
                .size += 1;
        }
        for cluster in clusters.values() {
            if let Some(component) = components.get_mut(&cluster.component_id) {
                component.clusters.push(cluster.id);
            }
        }

        let links = LinkTable::from_adjacency(self.adjacency_lists);

        log::info!(
            "Built graph with {} nodes, {} links, {} clusters, {} components",
            self.nodes.len(),
            links.len(),
            clusters.len(),
            components.len()
        );

        let mut graph = ClusterGraph {
            nodes: self.nodes,
            index: self.id_to_index.into_iter().map(|(id, idx)| (id, idx as usize)).collect(),
            links,
            clusters,
            components,
            nclass,
            stats: self.stats,
        };
        graph.recount_categories(CategorySource::Prediction);

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::input::InputGraph;
    use crate::graph::InputLink;

    #[test]
    fn skips_malformed_records() {
        let input = InputGraph {
            nodes: vec![
                InputNode::new(1, 0, 0, vec![0], 0),
                InputNode::new(2, 0, 0, vec![], 0),
                InputNode::new(1, 1, 1, vec![1], 0),
                InputNode::new(3, 2, 0, vec![1, 1], 0),
            ],
            links: vec![InputLink::new(1, 3), InputLink::new(1, 2), InputLink::new(9, 3)],
        };
        let graph = ClusterGraph::from_input(&input).unwrap();

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.links().len(), 1);
        assert_eq!(
            *graph.stats(),
            BuildStats {
                skipped_nodes: 1,
                duplicate_nodes: 1,
                skipped_links: 2,
                mixed_component_members: 0,
            }
        );
        assert_eq!(graph.node_by_id(3).unwrap().clusters, vec![1]);
        assert_eq!(graph.nclass(), 3);
    }

    #[test]
    fn cluster_component_comes_from_first_member() {
        let input = InputGraph {
            nodes: vec![
                InputNode::new(1, 0, 0, vec![5], 2),
                InputNode::new(2, 0, 0, vec![5], 3),
                InputNode::new(3, 0, 0, vec![4], 3),
            ],
            links: vec![],
        };
        let graph = ClusterGraph::from_input(&input).unwrap();

        assert_eq!(graph.cluster(5).unwrap().component_id, 2);
        assert_eq!(graph.cluster(5).unwrap().members, vec![0, 1]);
        assert_eq!(graph.stats().mixed_component_members, 1);
        assert_eq!(graph.component(3).unwrap().clusters, vec![4]);
        assert_eq!(graph.component(3).unwrap().size, 2);
        assert_eq!(graph.clusters().keys().copied().collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn empty_graph_is_an_error() {
        let input = InputGraph {
            nodes: vec![InputNode::new(1, 0, 0, vec![], 0)],
            links: vec![],
        };
        assert_eq!(ClusterGraph::from_input(&input).unwrap_err(), ViewError::EmptyGraph);
    }
}
