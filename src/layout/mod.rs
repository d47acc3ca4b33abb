//! Initial placement of components by two-level rectangle packing

pub mod hints;
pub mod packer;

use std::collections::BTreeMap;

use crate::cluster::ComponentId;
use crate::config::Config;
use crate::error::Result;
use crate::geometry::Point;
use crate::graph::ClusterGraph;

pub use packer::{block_side, pack_squares, Block, PackOutcome, Packer};

/// One thing to place: its size metric, its key and the category it is grouped by
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem<K, C> {
    pub size: f64,
    pub key: K,
    pub category: C,
}

/// Pack items per category, then pack the categories' footprints, and center
/// the result on the canvas. Returns the anchor of every item.
pub fn pack_grouped<K, C>(items: &[LayoutItem<K, C>], config: &Config) -> Result<BTreeMap<K, Point>>
where
    K: Copy + Ord,
    C: Copy + Ord,
{
    let mut by_category: BTreeMap<C, Vec<&LayoutItem<K, C>>> = BTreeMap::new();
    for item in items {
        by_category.entry(item.category).or_default().push(item);
    }

    // First level: items inside each category
    let mut groups = Vec::with_capacity(by_category.len());
    for members in by_category.values() {
        let sides: Vec<f64> = members.iter().map(|item| block_side(item.size, config)).collect();
        let outcome = pack_squares(&sides, config)?;
        groups.push((members, outcome));
    }

    // Second level: each category's footprint becomes one block
    let footprints: Vec<f64> = groups.iter().map(|(_, outcome)| outcome.footprint()).collect();
    let outer = pack_squares(&footprints, config)?;

    let mut anchors = BTreeMap::new();
    for ((members, outcome), slot) in groups.iter().zip(&outer.rects) {
        for (item, rect) in members.iter().zip(&outcome.rects) {
            let inner = rect.center();
            anchors.insert(item.key, Point::new(slot.x + inner.x, slot.y + inner.y));
        }
    }

    if let Some(centroid) = Point::centroid(anchors.values().copied()) {
        let (cx, cy) = config.canvas_center();
        let (dx, dy) = (cx - centroid.x, cy - centroid.y);
        for anchor in anchors.values_mut() {
            *anchor = anchor.offset(dx, dy);
        }
    }

    log::info!(
        "Packed {} items in {} categories (outer canvas {:.1})",
        anchors.len(),
        groups.len(),
        outer.canvas
    );

    Ok(anchors)
}

/// Initial anchor of every component, grouped by dominant category and sized
/// by node count
pub fn component_anchors(graph: &ClusterGraph, config: &Config) -> Result<BTreeMap<ComponentId, Point>> {
    let items: Vec<LayoutItem<ComponentId, usize>> = graph
        .components()
        .values()
        .map(|component| LayoutItem {
            size: component.size as f64,
            key: component.id,
            category: component.dominant,
        })
        .collect();
    pack_grouped(&items, config)
}
