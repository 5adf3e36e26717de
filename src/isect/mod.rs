//! Intersection engine for screen-space labels.
//!
//! Provides:
//! - `Aabb` / `Obb` screen-space bounds
//! - Grid and R-tree broad phases producing candidate pairs
//! - Narrow phase keeping only pairs whose oriented boxes truly overlap

mod bounds;
mod grid;
mod rtree;

pub use bounds::{Aabb, Obb};
pub use grid::GridBroadPhase;
pub use rtree::{IndexedBounds, RTreeBroadPhase};

use glam::Vec2;

use crate::config::BroadPhase;

/// Broad phase selected by configuration.
pub enum BroadPhaseIndex {
    Grid(GridBroadPhase),
    RTree(RTreeBroadPhase),
}

impl BroadPhaseIndex {
    pub fn new(kind: BroadPhase, split: [u32; 2], viewport: Vec2) -> Self {
        match kind {
            BroadPhase::Grid => Self::Grid(GridBroadPhase::new(split, viewport)),
            BroadPhase::RTree => Self::RTree(RTreeBroadPhase::new()),
        }
    }

    /// Candidate pairs `(i, j)`, `i < j`, sorted and without duplicates.
    /// Every pair of boxes with positive overlap is included.
    pub fn pairs(&mut self, aabbs: &[Aabb]) -> Vec<(usize, usize)> {
        match self {
            Self::Grid(grid) => grid.pairs(aabbs),
            Self::RTree(tree) => tree.pairs(aabbs),
        }
    }
}

/// Keep the candidate pairs whose oriented boxes intersect.
/// The extents are compared first since they are cheaper and contain the boxes.
pub fn narrow_phase(pairs: &[(usize, usize)], aabbs: &[Aabb], obbs: &[Obb]) -> Vec<(usize, usize)> {
    pairs
        .iter()
        .copied()
        .filter(|&(a, b)| aabbs[a].intersects(&aabbs[b]) && obbs[a].intersects(&obbs[b]))
        .collect()
}
