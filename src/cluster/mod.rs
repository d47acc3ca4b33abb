//! Clusters and components module

pub mod metrics;

use serde::{Deserialize, Serialize};

pub use metrics::{CategorySource, PieSlice};

pub type ClusterId = u32;
pub type ComponentId = u32;

/// A fixed group of raw nodes that is shown either expanded or folded into one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Unique identifier for this cluster
    pub id: ClusterId,

    /// Members of this cluster (node indices into the owning graph)
    pub members: Vec<usize>,

    /// Component of the first member
    pub component_id: ComponentId,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A coarser grouping of clusters sharing a component id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,

    /// Clusters whose component is this one, ascending
    pub clusters: Vec<ClusterId>,

    /// Number of distinct raw nodes in the component
    pub size: usize,

    /// Count of each category among the component's nodes
    pub histogram: Vec<usize>,

    /// Argmax of `histogram`, first index wins ties
    pub dominant: usize,
}
