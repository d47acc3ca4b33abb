//! Convex boundaries around expanded clusters

use std::collections::{BTreeMap, HashMap};

use crate::cluster::{Cluster, ClusterId};
use crate::geometry::Point;
use crate::graph::ClusterGraph;
use crate::view::model::{EntityId, Hull};
use crate::view::SelectionFilter;

/// Build one hull per expanded, included cluster from its members' positions.
///
/// Each member contributes the four corners of a square of half-side `margin`
/// around it. Clusters without any positioned member are skipped.
pub fn build_hulls(
    graph: &ClusterGraph,
    expanded: &BTreeMap<ClusterId, bool>,
    filter: &SelectionFilter,
    positions: &HashMap<EntityId, Point>,
    margin: f64,
) -> Vec<Hull> {
    let mut hulls = Vec::new();
    let mut cloud = Vec::new();

    for cluster in graph.clusters().values() {
        if !expanded.get(&cluster.id).copied().unwrap_or(false) || !filter.includes(cluster.component_id) {
            continue;
        }
        cloud.clear();
        padded_cloud(graph, cluster, positions, margin, &mut cloud);
        if cloud.is_empty() {
            continue;
        }
        let boundary = convex_hull(&mut cloud);
        if boundary.len() < 3 {
            continue;
        }
        hulls.push(Hull {
            cluster_id: cluster.id,
            boundary,
        });
    }

    hulls
}

fn padded_cloud(
    graph: &ClusterGraph,
    cluster: &Cluster,
    positions: &HashMap<EntityId, Point>,
    margin: f64,
    out: &mut Vec<Point>,
) {
    for node in graph.members(cluster) {
        let Some(&p) = positions.get(&EntityId::Raw(node.id)) else {
            continue;
        };
        out.push(p.offset(-margin, -margin));
        out.push(p.offset(-margin, margin));
        out.push(p.offset(margin, -margin));
        out.push(p.offset(margin, margin));
    }
}

/// Andrew's monotone chain. Returns vertices counter-clockwise starting from
/// the lowest-x point, collinear points dropped. Sorts `points` in place.
pub fn convex_hull(points: &mut [Point]) -> Vec<Point> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points.iter() {
        if unique.last() != Some(&p) {
            unique.push(p);
        }
    }
    if unique.len() < 3 {
        return unique;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(unique.len());
    for &p in &unique {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(unique.len());
    for &p in unique.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// True when `p` lies inside or on the boundary of a counter-clockwise polygon
pub fn contains(boundary: &[Point], p: Point) -> bool {
    const EPS: f64 = 1e-6;
    if boundary.len() < 3 {
        return false;
    }
    boundary
        .iter()
        .zip(boundary.iter().cycle().skip(1))
        .all(|(&a, &b)| cross(a, b, p) >= -EPS)
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}
