//! Per-entity error levels for the alternative color modes

use serde::{Deserialize, Serialize};

use crate::graph::{ClusterGraph, GraphNode};
use crate::view::model::{EntityId, VisibleEntity};

/// How entities are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Category pie charts, no overlay
    #[default]
    Category,
    /// Estimated error of each node
    EstimatedError,
    /// Whether the prediction disagrees with the label
    TrueError,
}

fn node_error(node: &GraphNode, mode: ColorMode) -> f64 {
    match mode {
        ColorMode::Category => 0.0,
        ColorMode::EstimatedError => node.error_est.unwrap_or(0.0),
        ColorMode::TrueError => {
            if node.prediction != node.label {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Error level in `[0, 1]` for one visible entity, `None` in category mode
/// or when the entity is not part of `graph`
pub fn error_level(graph: &ClusterGraph, entity: &VisibleEntity, mode: ColorMode) -> Option<f64> {
    if mode == ColorMode::Category {
        return None;
    }
    match entity.id {
        EntityId::Raw(id) => graph.node_by_id(id).map(|node| node_error(node, mode)),
        EntityId::Cluster(id) => {
            let cluster = graph.cluster(id)?;
            if cluster.is_empty() {
                return None;
            }
            let total: f64 = graph.members(cluster).map(|node| node_error(node, mode)).sum();
            Some(total / cluster.size() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::PieSlice;
    use crate::geometry::Point;
    use crate::graph::{InputGraph, InputNode};
    use crate::view::model::EntityKind;

    fn entity(id: EntityId) -> VisibleEntity {
        VisibleEntity {
            id,
            kind: EntityKind::Component { cluster: 0, dominant: 0 },
            component_id: 0,
            clusters: vec![0],
            size: 1,
            pie: Vec::<PieSlice>::new(),
            position: Point::default(),
        }
    }

    fn graph() -> ClusterGraph {
        let input = InputGraph {
            nodes: vec![
                InputNode::new(0, 1, 0, vec![0], 0).with_error_estimate(0.5),
                InputNode::new(1, 1, 1, vec![0], 0),
                InputNode::new(2, 0, 1, vec![0], 0).with_error_estimate(1.0),
                InputNode::new(3, 0, 0, vec![0], 0),
            ],
            links: vec![],
        };
        ClusterGraph::from_input(&input).unwrap()
    }

    #[test]
    fn cluster_level_is_member_mean() {
        let graph = graph();
        let cluster = entity(EntityId::Cluster(0));
        assert_eq!(error_level(&graph, &cluster, ColorMode::TrueError), Some(0.5));
        assert_eq!(error_level(&graph, &cluster, ColorMode::EstimatedError), Some(0.375));
        assert_eq!(error_level(&graph, &cluster, ColorMode::Category), None);
    }

    #[test]
    fn node_levels() {
        let graph = graph();
        assert_eq!(error_level(&graph, &entity(EntityId::Raw(0)), ColorMode::TrueError), Some(1.0));
        assert_eq!(error_level(&graph, &entity(EntityId::Raw(1)), ColorMode::EstimatedError), Some(0.0));
        assert_eq!(error_level(&graph, &entity(EntityId::Raw(9)), ColorMode::TrueError), None);
    }
}
