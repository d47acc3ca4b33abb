//! End-to-end scenarios driving a view session the way an event loop would.

use std::collections::BTreeSet;

use cluster_view::graph::{InputLink, InputNode};
use cluster_view::view::AggregatedEdge;
use cluster_view::{ClusterGraph, Config, EntityId, InputGraph, RenderModel, SelectionFilter, ViewError, ViewSession};

const A: u32 = 0;
const B: u32 = 1;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Nodes {1,2,3,4}, clusters A=[1,2] and B=[3,4], one raw edge (1,3)
fn two_cluster_session() -> ViewSession {
    init_logging();
    let input = InputGraph {
        nodes: vec![
            InputNode::new(1, 0, 0, vec![A], 0),
            InputNode::new(2, 0, 0, vec![A], 0),
            InputNode::new(3, 1, 1, vec![B], 0),
            InputNode::new(4, 1, 1, vec![B], 0),
        ],
        links: vec![InputLink::new(1, 3)],
    };
    ViewSession::from_input(&input, Config::default()).unwrap()
}

fn node_set(view: &RenderModel) -> BTreeSet<EntityId> {
    view.entity_ids().collect()
}

fn edge_set(view: &RenderModel) -> BTreeSet<(EntityId, EntityId)> {
    view.links.iter().map(|e| (e.source, e.target)).collect()
}

fn edge(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    let e = AggregatedEdge::new(a, b).unwrap();
    (e.source, e.target)
}

#[test]
fn both_collapsed_gives_one_cluster_edge() {
    let session = two_cluster_session();
    let view = session.view();

    assert_eq!(
        node_set(view),
        BTreeSet::from([EntityId::Cluster(A), EntityId::Cluster(B)])
    );
    assert_eq!(
        edge_set(view),
        BTreeSet::from([edge(EntityId::Cluster(A), EntityId::Cluster(B))])
    );
}

#[test]
fn expanding_one_side_links_raw_node_to_cluster() {
    let mut session = two_cluster_session();
    let view = session.toggle(A).unwrap();

    assert_eq!(
        node_set(view),
        BTreeSet::from([EntityId::Raw(1), EntityId::Raw(2), EntityId::Cluster(B)])
    );
    assert_eq!(
        edge_set(view),
        BTreeSet::from([edge(EntityId::Raw(1), EntityId::Cluster(B))])
    );
}

#[test]
fn expanding_both_sides_restores_raw_edge() {
    let mut session = two_cluster_session();
    session.toggle(A).unwrap();
    let view = session.toggle(B).unwrap();

    assert_eq!(
        node_set(view),
        BTreeSet::from([EntityId::Raw(1), EntityId::Raw(2), EntityId::Raw(3), EntityId::Raw(4)])
    );
    assert_eq!(edge_set(view), BTreeSet::from([edge(EntityId::Raw(1), EntityId::Raw(3))]));
    assert_eq!(view.hulls.len(), 2);
}

#[test]
fn double_toggle_restores_the_view() {
    let mut session = two_cluster_session();
    let nodes = node_set(session.view());
    let edges = edge_set(session.view());

    session.toggle(B).unwrap();
    let view = session.toggle(B).unwrap();

    assert_eq!(node_set(view), nodes);
    assert_eq!(edge_set(view), edges);
    assert_eq!(session.is_expanded(B), Ok(false));
}

#[test]
fn unknown_cluster_leaves_state_alone() {
    let mut session = two_cluster_session();
    let before = session.view().clone();

    assert_eq!(session.toggle(42).unwrap_err(), ViewError::UnknownCluster(42));
    assert_eq!(session.view(), &before);
}

#[test]
fn malformed_records_do_not_blank_the_view() {
    init_logging();
    let json = r#"{
        "nodes": [
            {"id": 0, "prediction": 0, "label": 0, "group": [0], "cid": 0},
            {"id": 1, "prediction": 0, "label": 0, "group": [], "cid": 0},
            {"id": 2, "prediction": 1, "label": 1, "group": [1], "cid": 1}
        ],
        "links": [
            {"source": 0, "target": 2},
            {"source": 0, "target": 1},
            {"source": 5, "target": 2}
        ]
    }"#;
    let graph = ClusterGraph::from_json_str(json).unwrap();
    assert_eq!(graph.stats().skipped_nodes, 1);
    assert_eq!(graph.stats().skipped_links, 2);

    let session = ViewSession::new(graph, Config::default()).unwrap();
    assert_eq!(session.view().nodes.len(), 2);
    assert_eq!(session.view().links.len(), 1);
}

#[test]
fn filtering_then_resetting_brings_everything_back() {
    init_logging();
    let input = InputGraph {
        nodes: vec![
            InputNode::new(0, 0, 0, vec![0], 10),
            InputNode::new(1, 1, 1, vec![1], 20),
            InputNode::new(2, 1, 1, vec![2], 20),
        ],
        links: vec![InputLink::new(0, 1), InputLink::new(1, 2)],
    };
    let mut session = ViewSession::from_input(&input, Config::default()).unwrap();

    let view = session.set_filter(SelectionFilter::only([20]));
    assert_eq!(node_set(view), BTreeSet::from([EntityId::Cluster(1), EntityId::Cluster(2)]));
    assert_eq!(view.links.len(), 1);

    // Toggling an excluded cluster is a silent no-op
    let view = session.toggle(0).unwrap();
    assert_eq!(view.nodes.len(), 2);

    let view = session.set_filter(SelectionFilter::all());
    assert_eq!(view.nodes.len(), 3);
    assert_eq!(view.links.len(), 2);
}

#[test]
fn component_anchors_are_centered_on_canvas() {
    let session = two_cluster_session();
    let config = session.config();
    let anchor = session.component_anchor(0).unwrap();

    assert_eq!(anchor.x, config.canvas_width / 2.0);
    assert_eq!(anchor.y, config.canvas_height / 2.0);
}
