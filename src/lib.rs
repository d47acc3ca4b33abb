//! Multi-level view engine for clustered graphs: folds clusters into single
//! entities and back, aggregates edges between whatever is visible, draws
//! hulls around expanded clusters and packs components into initial positions.

pub mod cluster;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod storage;
pub mod view;

pub use cluster::{CategorySource, ClusterId, ComponentId};
pub use config::Config;
pub use error::{Result, ViewError};
pub use geometry::Point;
pub use graph::{ClusterGraph, InputGraph, NodeId};
pub use view::{ColorMode, EntityId, RenderModel, SelectionFilter, ViewSession};
