//! Input graph format as handed over by the loader

use serde::{Deserialize, Serialize};

use crate::cluster::{ClusterId, ComponentId};
use crate::error::Result;
use crate::graph::NodeId;

/// A parsed graph: nodes with their cluster memberships and plain links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputGraph {
    pub nodes: Vec<InputNode>,

    #[serde(default)]
    pub links: Vec<InputLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputNode {
    pub id: NodeId,

    pub prediction: usize,

    pub label: usize,

    #[serde(default)]
    pub known_label: bool,

    /// Clusters this node belongs to
    #[serde(default)]
    pub group: Vec<ClusterId>,

    /// Component the node's clusters belong to
    pub cid: ComponentId,

    /// Estimated probability that the prediction is wrong
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_est: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLink {
    pub source: NodeId,
    pub target: NodeId,
}

impl InputGraph {
    /// Decode an already loaded JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl InputNode {
    pub fn new(id: NodeId, prediction: usize, label: usize, group: Vec<ClusterId>, cid: ComponentId) -> Self {
        Self {
            id,
            prediction,
            label,
            known_label: false,
            group,
            cid,
            error_est: None,
        }
    }

    pub fn with_known_label(mut self, known: bool) -> Self {
        self.known_label = known;
        self
    }

    pub fn with_error_estimate(mut self, error_est: f64) -> Self {
        self.error_est = Some(error_est);
        self
    }
}

impl InputLink {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}
