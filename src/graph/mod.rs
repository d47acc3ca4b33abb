//! Graph representation module

pub mod builder;
pub mod compressed;
pub mod input;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::cluster::metrics::{self, CategorySource};
use crate::cluster::{Cluster, ClusterId, Component, ComponentId};
use crate::error::Result;

pub use builder::{BuildStats, GraphBuilder};
pub use compressed::LinkTable;
pub use input::{InputGraph, InputLink, InputNode};

pub type NodeId = u32;

/// A raw node of the input graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub prediction: usize,
    pub label: usize,
    pub known_label: bool,

    /// Clusters the node belongs to, never empty
    pub clusters: Vec<ClusterId>,

    pub component_id: ComponentId,

    pub error_est: Option<f64>,
}

/// Immutable graph plus the cluster and component structure built on top of it
#[derive(Debug, Clone)]
pub struct ClusterGraph {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) index: HashMap<NodeId, usize>,
    pub(crate) links: LinkTable,
    pub(crate) clusters: BTreeMap<ClusterId, Cluster>,
    pub(crate) components: BTreeMap<ComponentId, Component>,
    pub(crate) nclass: usize,
    pub(crate) stats: BuildStats,
}

impl ClusterGraph {
    /// Validate and index an input graph, skipping malformed records
    pub fn from_input(input: &InputGraph) -> Result<Self> {
        let mut builder = GraphBuilder::with_capacity(input.nodes.len());
        for node in &input.nodes {
            builder.add_node(node);
        }
        for link in &input.links {
            builder.add_link(link.source, link.target);
        }
        builder.build()
    }

    /// Decode and build from an in-memory JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_input(&InputGraph::from_json_str(json)?)
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get(index)
    }

    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&GraphNode> {
        self.node_index(id).map(|idx| &self.nodes[idx])
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    pub fn clusters(&self) -> &BTreeMap<ClusterId, Cluster> {
        &self.clusters
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    pub fn components(&self) -> &BTreeMap<ComponentId, Component> {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    /// Number of categories (`max(prediction, label) + 1`)
    pub fn nclass(&self) -> usize {
        self.nclass
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Member nodes of a cluster
    pub fn members<'a>(&'a self, cluster: &'a Cluster) -> impl Iterator<Item = &'a GraphNode> + 'a {
        cluster.members.iter().filter_map(move |&idx| self.nodes.get(idx))
    }

    /// Category histogram of one cluster
    pub fn cluster_histogram(&self, cluster: &Cluster, source: CategorySource) -> Vec<usize> {
        metrics::histogram(self.members(cluster), self.nclass, source)
    }

    /// Recount every component's histogram and dominant category
    pub fn recount_categories(&mut self, source: CategorySource) {
        let mut by_component: HashMap<ComponentId, Vec<usize>> = HashMap::new();
        for node in &self.nodes {
            let counts = by_component
                .entry(node.component_id)
                .or_insert_with(|| vec![0; self.nclass]);
            let category = metrics::category_of(node, source);
            if category >= counts.len() {
                counts.resize(category + 1, 0);
            }
            counts[category] += 1;
        }

        for (id, component) in self.components.iter_mut() {
            let counts = by_component.remove(id).unwrap_or_else(|| vec![0; self.nclass]);
            component.dominant = metrics::dominant_category(&counts);
            component.histogram = counts;
        }
    }
}
