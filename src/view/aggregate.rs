//! Aggregation of the raw graph into the currently visible entities and edges

use std::collections::{BTreeMap, HashMap, HashSet};

use itertools::{iproduct, Itertools};

use crate::cluster::metrics::{self, CategorySource};
use crate::cluster::{Cluster, ClusterId, ComponentId};
use crate::geometry::Point;
use crate::graph::{ClusterGraph, GraphNode, NodeId};
use crate::view::dedup::{EdgeSet, Insert};
use crate::view::hull;
use crate::view::model::{AggregationStats, EntityId, EntityKind, RenderModel, VisibleEntity};
use crate::view::SelectionFilter;

/// Everything one aggregation pass reads
pub struct AggregationInput<'a> {
    pub graph: &'a ClusterGraph,

    pub expanded: &'a BTreeMap<ClusterId, bool>,

    pub filter: &'a SelectionFilter,

    /// Positions of the entities visible in the previous frame
    pub previous: &'a HashMap<EntityId, Point>,

    /// Last known positions of raw nodes, including ones hidden since
    pub remembered: &'a HashMap<NodeId, Point>,

    /// Initial position of each component
    pub anchors: &'a BTreeMap<ComponentId, Point>,

    /// Cluster whose state was just flipped, if any
    pub toggled: Option<ClusterId>,

    pub category_source: CategorySource,

    pub hull_margin: f64,
}

impl AggregationInput<'_> {
    fn is_expanded(&self, cluster: ClusterId) -> bool {
        self.expanded.get(&cluster).copied().unwrap_or(false)
    }

    fn anchor(&self, component: ComponentId) -> Point {
        self.anchors.get(&component).copied().unwrap_or_default()
    }
}

/// Compute the visible nodes, deduplicated edges and hulls for one view state
pub fn aggregate(input: &AggregationInput<'_>) -> RenderModel {
    let graph = input.graph;
    let mut stats = AggregationStats::default();

    let nodes = materialize_entities(input);

    let mut edges = EdgeSet::with_capacity(graph.links().len());

    // Edges implied by raw links
    for (src, dst) in graph.links().iter() {
        let (Some(u), Some(v)) = (graph.node(src), graph.node(dst)) else {
            log::warn!("Skipping link {} -> {}: node index out of range", src, dst);
            stats.skipped_links += 1;
            continue;
        };
        for (&gi, &gj) in iproduct!(&u.clusters, &v.clusters) {
            if !included_pair(input, gi, gj) {
                continue;
            }
            let (a, b) = endpoints(input, u, gi, v, gj);
            tally(edges.insert(a, b), &mut stats);
        }
    }

    // Edges implied by a node sitting in several clusters
    for node in graph.nodes() {
        for (&gi, &gj) in node.clusters.iter().tuple_combinations() {
            if !included_pair(input, gi, gj) {
                continue;
            }
            let (a, b) = endpoints(input, node, gi, node, gj);
            tally(edges.insert(a, b), &mut stats);
        }
    }

    let positions: HashMap<EntityId, Point> = nodes.iter().map(|e| (e.id, e.position)).collect();
    let hulls = hull::build_hulls(graph, input.expanded, input.filter, &positions, input.hull_margin);

    log::debug!(
        "Aggregated view: {} entities, {} edges, {} hulls ({} duplicates, {} self-loops dropped)",
        nodes.len(),
        edges.len(),
        hulls.len(),
        stats.duplicate_edges,
        stats.self_loops
    );

    RenderModel {
        nodes,
        links: edges.into_edges(),
        hulls,
        stats,
    }
}

fn tally(outcome: Insert, stats: &mut AggregationStats) {
    match outcome {
        Insert::Added => {}
        Insert::Duplicate => stats.duplicate_edges += 1,
        Insert::SelfLoop => stats.self_loops += 1,
    }
}

fn included_pair(input: &AggregationInput<'_>, gi: ClusterId, gj: ClusterId) -> bool {
    let included = |g: ClusterId| {
        input
            .graph
            .cluster(g)
            .map_or(false, |c| input.filter.includes(c.component_id))
    };
    included(gi) && included(gj)
}

/// Visible endpoints for a raw adjacency `u` (via cluster `gi`) to `v` (via cluster `gj`)
fn endpoints(
    input: &AggregationInput<'_>,
    u: &GraphNode,
    gi: ClusterId,
    v: &GraphNode,
    gj: ClusterId,
) -> (EntityId, EntityId) {
    match (input.is_expanded(gi), input.is_expanded(gj)) {
        (false, false) => (EntityId::Cluster(gi), EntityId::Cluster(gj)),
        (true, true) => (EntityId::Raw(u.id), EntityId::Raw(v.id)),
        (true, false) => (EntityId::Raw(u.id), EntityId::Cluster(gj)),
        (false, true) => (EntityId::Cluster(gi), EntityId::Raw(v.id)),
    }
}

fn materialize_entities(input: &AggregationInput<'_>) -> Vec<VisibleEntity> {
    let graph = input.graph;
    let mut entities = Vec::new();
    let mut emitted: HashSet<NodeId> = HashSet::new();

    for cluster in graph.clusters().values() {
        if !input.filter.includes(cluster.component_id) || cluster.is_empty() {
            continue;
        }

        if input.is_expanded(cluster.id) {
            // Newly revealed members start where the collapsed cluster was
            let burst_origin = if input.toggled == Some(cluster.id) {
                input.previous.get(&EntityId::Cluster(cluster.id)).copied()
            } else {
                None
            };

            for node in graph.members(cluster) {
                if !emitted.insert(node.id) {
                    continue;
                }
                let position = burst_origin
                    .or_else(|| input.previous.get(&EntityId::Raw(node.id)).copied())
                    .or_else(|| input.remembered.get(&node.id).copied())
                    .unwrap_or_else(|| input.anchor(node.component_id));
                entities.push(node_entity(input, node, position));
            }
        } else {
            entities.push(cluster_entity(input, cluster));
        }
    }

    entities
}

fn node_entity(input: &AggregationInput<'_>, node: &GraphNode, position: Point) -> VisibleEntity {
    let category = metrics::category_of(node, input.category_source);
    VisibleEntity {
        id: EntityId::Raw(node.id),
        kind: EntityKind::Node {
            prediction: node.prediction,
            label: node.label,
            known_label: node.known_label,
        },
        component_id: node.component_id,
        clusters: node.clusters.clone(),
        size: 1,
        pie: metrics::single_slice(category, input.graph.nclass()),
        position,
    }
}

fn cluster_entity(input: &AggregationInput<'_>, cluster: &Cluster) -> VisibleEntity {
    let graph = input.graph;
    let id = EntityId::Cluster(cluster.id);

    let position = input
        .previous
        .get(&id)
        .copied()
        .or_else(|| {
            if input.toggled != Some(cluster.id) {
                return None;
            }
            // Just collapsed: fold into the members' mean position
            Point::centroid(
                graph
                    .members(cluster)
                    .filter_map(|n| input.previous.get(&EntityId::Raw(n.id)).copied()),
            )
        })
        .unwrap_or_else(|| input.anchor(cluster.component_id));

    let histogram = graph.cluster_histogram(cluster, input.category_source);
    let dominant = graph
        .component(cluster.component_id)
        .map(|c| c.dominant)
        .unwrap_or_else(|| metrics::dominant_category(&histogram));

    VisibleEntity {
        id,
        kind: EntityKind::Component {
            cluster: cluster.id,
            dominant,
        },
        component_id: cluster.component_id,
        clusters: vec![cluster.id],
        size: cluster.size(),
        pie: metrics::pie_breakdown(&histogram, graph.nclass()),
        position,
    }
}
