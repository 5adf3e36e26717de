//! R-tree based broad phase for label collision.
//!
//! Scales better than the grid when many labels crowd a few cells.

use rstar::{RTree, RTreeObject, AABB};

use super::bounds::Aabb;

/// A candidate box stored in the tree.
#[derive(Debug, Clone, Copy)]
pub struct IndexedBounds {
    /// Position of the box in the candidate list.
    pub index: usize,
    pub bounds: Aabb,
}

impl RTreeObject for IndexedBounds {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope_of(&self.bounds)
    }
}

fn envelope_of(bounds: &Aabb) -> AABB<[f32; 2]> {
    AABB::from_corners(bounds.min.to_array(), bounds.max.to_array())
}

/// R-tree broad phase. The tree is rebuilt from scratch for every pass.
#[derive(Default)]
pub struct RTreeBroadPhase {
    tree: RTree<IndexedBounds>,
}

impl RTreeBroadPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report each pair of boxes whose envelopes touch or overlap, once,
    /// as `(i, j)` with `i < j`, sorted.
    pub fn pairs(&mut self, aabbs: &[Aabb]) -> Vec<(usize, usize)> {
        let items = aabbs
            .iter()
            .enumerate()
            .map(|(index, bounds)| IndexedBounds {
                index,
                bounds: *bounds,
            })
            .collect();
        self.tree = RTree::bulk_load(items);

        let mut pairs = Vec::new();
        for (i, bounds) in aabbs.iter().enumerate() {
            pairs.extend(
                self.tree
                    .locate_in_envelope_intersecting(&envelope_of(bounds))
                    .filter(|other| other.index > i)
                    .map(|other| (i, other.index)),
            );
        }
        pairs.sort_unstable();
        pairs
    }

    /// Number of boxes in the tree from the last pass.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pairs() {
        let mut tree = RTreeBroadPhase::new();
        let boxes = [Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(50.0, 50.0, 60.0, 60.0)];
        assert!(tree.pairs(&boxes).is_empty());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_overlapping_pairs() {
        let mut tree = RTreeBroadPhase::new();
        let boxes = [
            Aabb::new(0.0, 0.0, 20.0, 20.0),
            Aabb::new(10.0, 10.0, 30.0, 30.0),
            Aabb::new(25.0, 25.0, 40.0, 40.0),
        ];
        assert_eq!(tree.pairs(&boxes), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_rebuilt_each_pass() {
        let mut tree = RTreeBroadPhase::new();
        tree.pairs(&[Aabb::new(0.0, 0.0, 1.0, 1.0), Aabb::new(2.0, 2.0, 3.0, 3.0)]);
        assert!(tree.pairs(&[]).is_empty());
        assert!(tree.is_empty());
    }
}
