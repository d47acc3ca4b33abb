//! Stateful view session driven by external events

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::cluster::{CategorySource, ClusterId, ComponentId};
use crate::config::Config;
use crate::error::{Result, ViewError};
use crate::geometry::Point;
use crate::graph::{ClusterGraph, InputGraph, NodeId};
use crate::layout;
use crate::storage::{self, CoordinateRecord};
use crate::view::aggregate::{aggregate, AggregationInput};
use crate::view::hull;
use crate::view::model::{EntityId, Hull, RenderModel};
use crate::view::overlay::{self, ColorMode};
use crate::view::SelectionFilter;

/// Mutable view state over an immutable clustered graph.
///
/// Every state-changing call rebuilds the render model before returning.
/// Clusters start collapsed and every component starts included.
pub struct ViewSession {
    graph: ClusterGraph,
    config: Config,

    expanded: BTreeMap<ClusterId, bool>,
    filter: SelectionFilter,
    category_source: CategorySource,

    /// Initial position of each component
    anchors: BTreeMap<ComponentId, Point>,

    /// Positions of the entities in the current view
    previous: HashMap<EntityId, Point>,

    /// Last known position of every raw node ever shown
    remembered: HashMap<NodeId, Point>,

    view: RenderModel,

    /// Index of each entity in `view.nodes`
    slots: HashMap<EntityId, usize>,
}

impl ViewSession {
    /// Lay out components and compute the fully collapsed view
    pub fn new(graph: ClusterGraph, config: Config) -> Result<Self> {
        let anchors = layout::component_anchors(&graph, &config)?;
        let expanded = graph.clusters().keys().map(|&id| (id, false)).collect();

        let mut session = Self {
            graph,
            config,
            expanded,
            filter: SelectionFilter::all(),
            category_source: CategorySource::Prediction,
            anchors,
            previous: HashMap::new(),
            remembered: HashMap::new(),
            view: RenderModel::default(),
            slots: HashMap::new(),
        };
        session.recompute(None);

        log::info!(
            "Started view session over {} clusters in {} components",
            session.expanded.len(),
            session.anchors.len()
        );

        Ok(session)
    }

    pub fn from_input(input: &InputGraph, config: Config) -> Result<Self> {
        Self::new(ClusterGraph::from_input(input)?, config)
    }

    pub fn view(&self) -> &RenderModel {
        &self.view
    }

    pub fn graph(&self) -> &ClusterGraph {
        &self.graph
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn filter(&self) -> &SelectionFilter {
        &self.filter
    }

    pub fn category_source(&self) -> CategorySource {
        self.category_source
    }

    pub fn is_expanded(&self, cluster: ClusterId) -> Result<bool> {
        self.expanded
            .get(&cluster)
            .copied()
            .ok_or(ViewError::UnknownCluster(cluster))
    }

    pub fn component_anchor(&self, component: ComponentId) -> Option<Point> {
        self.anchors.get(&component).copied()
    }

    /// Flip one cluster between collapsed and expanded
    pub fn toggle(&mut self, cluster: ClusterId) -> Result<&RenderModel> {
        let expanded = self.is_expanded(cluster)?;
        self.set_expanded(cluster, !expanded)
    }

    pub fn expand(&mut self, cluster: ClusterId) -> Result<&RenderModel> {
        self.set_expanded(cluster, true)
    }

    pub fn collapse(&mut self, cluster: ClusterId) -> Result<&RenderModel> {
        self.set_expanded(cluster, false)
    }

    fn set_expanded(&mut self, cluster: ClusterId, value: bool) -> Result<&RenderModel> {
        let component = self
            .graph
            .cluster(cluster)
            .map(|c| c.component_id)
            .ok_or(ViewError::UnknownCluster(cluster))?;

        if !self.filter.includes(component) {
            log::debug!("Ignoring toggle of cluster {}: component {} is filtered out", cluster, component);
            return Ok(&self.view);
        }
        if self.expanded.get(&cluster) == Some(&value) {
            return Ok(&self.view);
        }

        self.expanded.insert(cluster, value);
        Ok(self.recompute(Some(cluster)))
    }

    /// Replace the component filter and collapse every cluster
    pub fn set_filter(&mut self, filter: SelectionFilter) -> &RenderModel {
        self.filter = filter;
        for state in self.expanded.values_mut() {
            *state = false;
        }
        self.recompute(None)
    }

    /// Include the given components, or all of them when none are given,
    /// optionally restricted to components whose dominant category matches
    pub fn select_components<I>(&mut self, components: I, category: Option<usize>) -> &RenderModel
    where
        I: IntoIterator<Item = ComponentId>,
    {
        let requested: BTreeSet<ComponentId> = components.into_iter().collect();
        let selected: BTreeSet<ComponentId> = self
            .graph
            .components()
            .values()
            .filter(|c| requested.is_empty() || requested.contains(&c.id))
            .filter(|c| category.map_or(true, |cat| c.dominant == cat))
            .map(|c| c.id)
            .collect();

        let unknown = requested.iter().filter(|id| self.graph.component(**id).is_none()).count();
        if unknown > 0 {
            log::debug!("Ignoring {} unknown component ids in selection", unknown);
        }

        let filter = if requested.is_empty() && category.is_none() {
            SelectionFilter::all()
        } else {
            SelectionFilter::only(selected)
        };
        self.set_filter(filter)
    }

    /// Switch between predicted and ground-truth categories
    pub fn set_category_source(&mut self, source: CategorySource) -> &RenderModel {
        if source != self.category_source {
            self.category_source = source;
            self.graph.recount_categories(source);
            return self.recompute(None);
        }
        &self.view
    }

    /// Record positions delivered by the external layout and refresh hulls.
    /// Ids not in the current view are ignored.
    pub fn tick<I>(&mut self, positions: I) -> &[Hull]
    where
        I: IntoIterator<Item = (EntityId, Point)>,
    {
        for (id, position) in positions {
            let Some(&slot) = self.slots.get(&id) else {
                continue;
            };
            self.view.nodes[slot].position = position;
            self.previous.insert(id, position);
            if let EntityId::Raw(node) = id {
                self.remembered.insert(node, position);
            }
        }

        self.view.hulls = hull::build_hulls(
            &self.graph,
            &self.expanded,
            &self.filter,
            &self.previous,
            self.config.dedup_offset_margin,
        );
        &self.view.hulls
    }

    /// Shift the anchor of a whole component, e.g. after it was dragged
    pub fn move_component(&mut self, component: ComponentId, dx: f64, dy: f64) -> Result<Point> {
        let anchor = self
            .anchors
            .get_mut(&component)
            .ok_or(ViewError::UnknownComponent(component))?;
        *anchor = anchor.offset(dx, dy);
        Ok(*anchor)
    }

    /// Coordinates of every visible entity, for export
    pub fn export_coordinates(&self) -> Vec<CoordinateRecord> {
        storage::coordinates(&self.view)
    }

    /// Error level per visible entity; empty in category mode
    pub fn error_overlay(&self, mode: ColorMode) -> Vec<(EntityId, f64)> {
        self.view
            .nodes
            .iter()
            .filter_map(|entity| overlay::error_level(&self.graph, entity, mode).map(|level| (entity.id, level)))
            .collect()
    }

    fn recompute(&mut self, toggled: Option<ClusterId>) -> &RenderModel {
        let view = aggregate(&AggregationInput {
            graph: &self.graph,
            expanded: &self.expanded,
            filter: &self.filter,
            previous: &self.previous,
            remembered: &self.remembered,
            anchors: &self.anchors,
            toggled,
            category_source: self.category_source,
            hull_margin: self.config.dedup_offset_margin,
        });

        self.previous = view.nodes.iter().map(|e| (e.id, e.position)).collect();
        self.slots = view.nodes.iter().enumerate().map(|(i, e)| (e.id, i)).collect();
        for entity in &view.nodes {
            if let EntityId::Raw(node) = entity.id {
                self.remembered.insert(node, entity.position);
            }
        }

        log::info!(
            "Recomputed view: {} entities, {} links, {} hulls",
            view.nodes.len(),
            view.links.len(),
            view.hulls.len()
        );

        self.view = view;
        &self.view
    }
}
