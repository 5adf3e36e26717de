//! Weak link between a label, its tile and the style that requested it.

use std::sync::{Arc, Weak};

use glam::Mat4;

use super::label::Label;
use crate::tile::TileId;

/// The manager's view of a submitted label. Holds no ownership: once the
/// tile drops the label, `label()` returns `None` and the unit is pruned.
#[derive(Debug, Clone)]
pub struct LabelUnit {
    label: Weak<Label>,
    tile_id: TileId,
    model_matrix: Mat4,
    style_name: String,
}

impl LabelUnit {
    pub fn new(label: &Arc<Label>, tile_id: TileId, model_matrix: Mat4, style_name: &str) -> Self {
        Self {
            label: Arc::downgrade(label),
            tile_id,
            model_matrix,
            style_name: style_name.to_string(),
        }
    }

    /// The label, if its tile still holds it.
    pub fn label(&self) -> Option<Arc<Label>> {
        self.label.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.label.strong_count() > 0
    }

    pub fn tile_id(&self) -> TileId {
        self.tile_id
    }

    /// Model matrix of the tile at submission time.
    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    pub fn style_name(&self) -> &str {
        &self.style_name
    }
}
