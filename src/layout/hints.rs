//! Sizing hints for the external force-directed layout

use crate::view::model::VisibleEntity;

const MAX_RADIUS: f64 = 50.0;
const MIN_LINK_DISTANCE: f64 = 50.0;
const MAX_LINK_DISTANCE: f64 = 200.0;

/// Drawn radius of an entity of the given size
pub fn node_radius(size: usize, scale: f64) -> f64 {
    ((size as f64).powf(0.25) * 10.0 * scale).min(MAX_RADIUS)
}

/// Rest length of a link. Raw nodes pull together; anything touching a
/// collapsed cluster keeps a distance growing with the smaller end.
pub fn link_distance(a: &VisibleEntity, b: &VisibleEntity) -> f64 {
    if a.is_node() && b.is_node() {
        return 0.0;
    }
    (a.size.min(b.size) as f64).clamp(MIN_LINK_DISTANCE, MAX_LINK_DISTANCE)
}
