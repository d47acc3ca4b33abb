//! Error types for the cluster view engine

use thiserror::Error;

use crate::cluster::{ClusterId, ComponentId};

/// Recoverable failures reported by the core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewError {
    #[error("unknown cluster: {0}")]
    UnknownCluster(ClusterId),

    #[error("unknown component: {0}")]
    UnknownComponent(ComponentId),

    #[error("layout failure: {items} blocks still unplaced after {retries} attempts")]
    LayoutFailure { retries: usize, items: usize },

    #[error("graph has no usable nodes")]
    EmptyGraph,

    #[error("invalid input graph: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::InvalidInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;
