//! Serializable exports of a rendered view

use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, to_string_pretty};

use crate::view::model::{EntityId, RenderModel};

/// What an exported coordinate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateKind {
    /// A collapsed cluster; the id is the cluster id
    Cluster,
    /// An original graph node; the id is the node id
    Node,
}

/// Final position of one visible entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: CoordinateKind,
    pub x: f64,
    pub y: f64,
}

/// Coordinates of every visible entity in view order
pub fn coordinates(view: &RenderModel) -> Vec<CoordinateRecord> {
    view.nodes
        .iter()
        .map(|entity| {
            let (id, kind) = match entity.id {
                EntityId::Raw(id) => (id, CoordinateKind::Node),
                EntityId::Cluster(id) => (id, CoordinateKind::Cluster),
            };
            CoordinateRecord {
                id,
                kind,
                x: entity.position.x,
                y: entity.position.y,
            }
        })
        .collect()
}

/// Coordinate export document: `{"coords": [...]}`
pub fn coordinates_json(view: &RenderModel) -> serde_json::Value {
    json!({ "coords": coordinates(view) })
}

/// Write the coordinate export document to `writer`
pub fn write_coordinates<W: Write>(view: &RenderModel, mut writer: W) -> Result<()> {
    log::info!("Exporting coordinates of {} entities", view.nodes.len());

    let document = to_string_pretty(&coordinates_json(view)).context("failed to encode coordinates")?;
    writer
        .write_all(document.as_bytes())
        .context("failed to write coordinates")?;

    Ok(())
}

/// Encode the full render model (nodes, links, hulls) for the rendering side
pub fn render_model_json(view: &RenderModel) -> Result<String> {
    to_string_pretty(view).context("failed to encode render model")
}
