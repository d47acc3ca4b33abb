//! Collapsed/expanded views of the clustered graph

pub mod aggregate;
pub mod dedup;
pub mod hull;
pub mod model;
pub mod overlay;
pub mod session;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cluster::ComponentId;

pub use aggregate::{aggregate, AggregationInput};
pub use dedup::EdgeSet;
pub use model::{AggregatedEdge, AggregationStats, EntityId, EntityKind, Hull, RenderModel, VisibleEntity};
pub use overlay::ColorMode;
pub use session::ViewSession;

/// Which components take part in the view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionFilter {
    /// `None` includes every component
    included: Option<BTreeSet<ComponentId>>,
}

impl SelectionFilter {
    pub fn all() -> Self {
        Self { included: None }
    }

    pub fn only<I>(components: I) -> Self
    where
        I: IntoIterator<Item = ComponentId>,
    {
        Self {
            included: Some(components.into_iter().collect()),
        }
    }

    pub fn includes(&self, component: ComponentId) -> bool {
        self.included.as_ref().map_or(true, |set| set.contains(&component))
    }

    pub fn is_all(&self) -> bool {
        self.included.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_membership() {
        assert!(SelectionFilter::all().includes(42));
        assert!(SelectionFilter::default().is_all());

        let only = SelectionFilter::only([1, 3]);
        assert!(only.includes(3));
        assert!(!only.includes(2));
        assert!(!only.is_all());
        assert!(!SelectionFilter::only([]).includes(0));
    }
}
