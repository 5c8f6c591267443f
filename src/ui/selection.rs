//! What the detail panel shows, and which shape is highlighted for it.

use crate::data::attributes::RegionAttributes;
use crate::rendering::layer::ShapeId;
use serde::{Deserialize, Serialize};

/// Details of the clicked region as presented to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub id: String,
    pub name: String,
    pub yield_val: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
}

impl From<&RegionAttributes> for SelectionRecord {
    fn from(attributes: &RegionAttributes) -> Self {
        Self {
            id: attributes.id.clone(),
            name: attributes.name.clone(),
            yield_val: attributes.yield_val,
            crop_type: attributes.crop_type.clone(),
        }
    }
}

/// At most one region is selected at a time
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    #[default]
    Empty,
    Selected {
        record: SelectionRecord,
        shape: ShapeId,
    },
}

impl SelectionState {
    /// Selects `shape`, returning the previously highlighted shape so its style can
    /// be restored. Reselecting the same shape returns `None`.
    pub fn select(&mut self, record: SelectionRecord, shape: ShapeId) -> Option<ShapeId> {
        let previous = self.highlighted().filter(|&previous| previous != shape);
        *self = SelectionState::Selected { record, shape };
        previous
    }

    /// Clears the selection, returning the shape that was highlighted
    pub fn dismiss(&mut self) -> Option<ShapeId> {
        match std::mem::take(self) {
            SelectionState::Selected { shape, .. } => Some(shape),
            SelectionState::Empty => None,
        }
    }

    pub fn highlighted(&self) -> Option<ShapeId> {
        match self {
            SelectionState::Selected { shape, .. } => Some(*shape),
            SelectionState::Empty => None,
        }
    }

    pub fn record(&self) -> Option<&SelectionRecord> {
        match self {
            SelectionState::Selected { record, .. } => Some(record),
            SelectionState::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SelectionState::Empty)
    }
}
