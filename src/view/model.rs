//! Render model handed to the external layout and rendering components

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cluster::{ClusterId, ComponentId, PieSlice};
use crate::geometry::Point;
use crate::graph::NodeId;

/// Identifier of a visible entity
///
/// Raw nodes and collapsed clusters live in separate id spaces; ordering puts
/// every raw node before every cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityId {
    Raw(NodeId),
    Cluster(ClusterId),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Raw(id) => write!(f, "n{}", id),
            EntityId::Cluster(id) => write!(f, "c{}", id),
        }
    }
}

/// What a visible entity stands for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "snake_case")]
pub enum EntityKind {
    Node {
        prediction: usize,
        label: usize,
        known_label: bool,
    },
    Component {
        cluster: ClusterId,
        /// Dominant category of the owning component
        dominant: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleEntity {
    pub id: EntityId,

    #[serde(flatten)]
    pub kind: EntityKind,

    pub component_id: ComponentId,

    /// Clusters represented by this entity
    pub clusters: Vec<ClusterId>,

    /// 1 for raw nodes, member count for collapsed clusters
    pub size: usize,

    pub pie: Vec<PieSlice>,

    pub position: Point,
}

impl VisibleEntity {
    pub fn is_node(&self) -> bool {
        matches!(self.kind, EntityKind::Node { .. })
    }
}

/// An undirected edge between two visible entities, stored with `source < target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregatedEdge {
    pub source: EntityId,
    pub target: EntityId,
}

impl AggregatedEdge {
    /// Canonical edge for an unordered pair, `None` for a self-loop
    pub fn new(a: EntityId, b: EntityId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { source: a, target: b }),
            std::cmp::Ordering::Greater => Some(Self { source: b, target: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn touches(&self, id: EntityId) -> bool {
        self.source == id || self.target == id
    }
}

/// Convex boundary of an expanded cluster, counter-clockwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hull {
    pub cluster_id: ClusterId,
    pub boundary: Vec<Point>,
}

/// Counters for records skipped during one aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    pub skipped_links: usize,
    pub self_loops: usize,
    pub duplicate_edges: usize,
}

/// Everything the external components need to draw one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub nodes: Vec<VisibleEntity>,
    pub links: Vec<AggregatedEdge>,
    pub hulls: Vec<Hull>,

    #[serde(skip)]
    pub stats: AggregationStats,
}

impl RenderModel {
    pub fn entity(&self, id: EntityId) -> Option<&VisibleEntity> {
        self.nodes.iter().find(|e| e.id == id)
    }

    pub fn has_edge(&self, a: EntityId, b: EntityId) -> bool {
        AggregatedEdge::new(a, b).map_or(false, |edge| self.links.contains(&edge))
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.nodes.iter().map(|e| e.id)
    }
}
