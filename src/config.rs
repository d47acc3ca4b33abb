//! Configuration management for the cluster view engine

use serde::{Deserialize, Serialize};

/// Tunables consumed by aggregation, hull and packing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Padding applied around every member node when building hulls
    pub dedup_offset_margin: f64,

    /// Amount the canvas scale grows after a failed pack attempt
    pub packing_scale_increment: f64,

    /// Pack blocks largest-first instead of in input order
    pub sort_blocks_by_size: bool,

    /// Canvas scale of the first pack attempt
    pub initial_packing_scale: f64,

    /// Side length of a block per unit of `sqrt(size)`
    pub block_unit: f64,

    /// Upper bound on pack attempts before reporting a layout failure
    pub max_packing_retries: usize,

    /// Width of the drawing area the layout is centered in
    pub canvas_width: f64,

    /// Height of the drawing area the layout is centered in
    pub canvas_height: f64,

    /// Multiplier for rendered node radii
    pub node_size_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dedup_offset_margin: 20.0,
            packing_scale_increment: 0.1,
            sort_blocks_by_size: false,
            initial_packing_scale: 0.5,
            block_unit: 15.0,
            max_packing_retries: 1000,
            canvas_width: 960.0,
            canvas_height: 600.0,
            node_size_scale: 1.0,
        }
    }
}

impl Config {
    /// Create a configuration from the three externally exposed knobs,
    /// keeping defaults for everything else
    pub fn new(
        dedup_offset_margin: f64,
        packing_scale_increment: f64,
        sort_blocks_by_size: bool,
    ) -> Self {
        Self {
            dedup_offset_margin,
            packing_scale_increment,
            sort_blocks_by_size,
            ..Self::default()
        }
    }

    /// Center of the drawing area
    pub fn canvas_center(&self) -> (f64, f64) {
        (self.canvas_width / 2.0, self.canvas_height / 2.0)
    }
}
