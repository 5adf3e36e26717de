//! Tiles own the labels built from their geometry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::labels::Label;

/// Slippy-map tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl TileId {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// What the label pipeline needs from a tile.
///
/// `add_label` hands over the only strong reference the pipeline keeps;
/// dropping the tile makes its labels unresolvable for the manager.
pub trait LabelTile {
    fn id(&self) -> TileId;

    /// Tile-local to world transform.
    fn model_matrix(&self) -> Mat4;

    fn add_label(&mut self, style_name: &str, label: Arc<Label>);
}

/// A tile keeping its labels grouped by requesting style.
#[derive(Debug)]
pub struct MapTile {
    id: TileId,
    model_matrix: Mat4,
    labels: HashMap<String, Vec<Arc<Label>>>,
}

impl MapTile {
    pub fn new(id: TileId, model_matrix: Mat4) -> Self {
        Self {
            id,
            model_matrix,
            labels: HashMap::new(),
        }
    }

    /// Labels registered by one style.
    pub fn labels(&self, style_name: &str) -> &[Arc<Label>] {
        self.labels.get(style_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn label_count(&self) -> usize {
        self.labels.values().map(Vec::len).sum()
    }

    /// Release every label this tile owns.
    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }
}

impl LabelTile for MapTile {
    fn id(&self) -> TileId {
        self.id
    }

    fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    fn add_label(&mut self, style_name: &str, label: Arc<Label>) {
        self.labels.entry(style_name.to_string()).or_default().push(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_display() {
        assert_eq!(TileId::new(3, 5, 12).to_string(), "12/3/5");
    }

    #[test]
    fn test_empty_tile() {
        let tile = MapTile::new(TileId::new(0, 0, 0), Mat4::IDENTITY);
        assert_eq!(tile.label_count(), 0);
        assert!(tile.labels("text").is_empty());
    }
}
