//! Grid-based broad phase for label collision.

use std::collections::HashSet;

use glam::Vec2;

use super::bounds::Aabb;

/// Uniform grid over the viewport. Every box is registered in each cell it
/// covers, so two boxes that overlap always share at least one cell.
/// Cell indices are clamped to the grid: boxes partly or fully off-screen
/// land in the border cells instead of being dropped.
pub struct GridBroadPhase {
    split_x: u32,
    split_y: u32,
    cell_size: Vec2,
    /// Indices of the boxes registered in each cell, row-major.
    cells: Vec<Vec<usize>>,
}

impl GridBroadPhase {
    /// Create a grid of `split` cells covering a `viewport` in pixels.
    pub fn new(split: [u32; 2], viewport: Vec2) -> Self {
        let split_x = split[0].max(1);
        let split_y = split[1].max(1);
        let viewport = viewport.max(Vec2::ONE);
        let cell_count = (split_x * split_y) as usize;

        Self {
            split_x,
            split_y,
            cell_size: Vec2::new(viewport.x / split_x as f32, viewport.y / split_y as f32),
            cells: vec![Vec::new(); cell_count],
        }
    }

    /// Clear all registered boxes.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Inclusive cell range `(col0, row0, col1, row1)` covered by a box.
    fn cell_range(&self, aabb: &Aabb) -> (u32, u32, u32, u32) {
        let col = |x: f32| ((x / self.cell_size.x).floor() as i64).clamp(0, self.split_x as i64 - 1) as u32;
        let row = |y: f32| ((y / self.cell_size.y).floor() as i64).clamp(0, self.split_y as i64 - 1) as u32;
        (col(aabb.min.x), row(aabb.min.y), col(aabb.max.x), row(aabb.max.y))
    }

    /// Register every box and report each pair of boxes sharing a cell,
    /// once, as `(i, j)` with `i < j`, sorted.
    pub fn pairs(&mut self, aabbs: &[Aabb]) -> Vec<(usize, usize)> {
        self.clear();

        for (index, aabb) in aabbs.iter().enumerate() {
            let (col0, row0, col1, row1) = self.cell_range(aabb);
            for row in row0..=row1 {
                for col in col0..=col1 {
                    self.cells[(row * self.split_x + col) as usize].push(index);
                }
            }
        }

        let mut seen = HashSet::new();
        for cell in &self.cells {
            for (n, &a) in cell.iter().enumerate() {
                for &b in &cell[n + 1..] {
                    seen.insert((a.min(b), a.max(b)));
                }
            }
        }

        let mut pairs: Vec<_> = seen.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Cell rectangles in row-major order, for debug drawing.
    pub fn cells(&self) -> Vec<Aabb> {
        let mut out = Vec::with_capacity(self.cells.len());
        for row in 0..self.split_y {
            for col in 0..self.split_x {
                let min = Vec2::new(col as f32, row as f32) * self.cell_size;
                out.push(Aabb {
                    min,
                    max: min + self.cell_size,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pairs_for_distant_boxes() {
        let mut grid = GridBroadPhase::new([4, 4], Vec2::new(100.0, 100.0));
        let boxes = [
            Aabb::new(0.0, 0.0, 10.0, 10.0),
            Aabb::new(60.0, 60.0, 70.0, 70.0),
        ];
        assert!(grid.pairs(&boxes).is_empty());
    }

    #[test]
    fn test_overlap_reported_once() {
        let mut grid = GridBroadPhase::new([4, 4], Vec2::new(100.0, 100.0));
        // Both boxes straddle four cells.
        let boxes = [
            Aabb::new(20.0, 20.0, 30.0, 30.0),
            Aabb::new(22.0, 22.0, 28.0, 28.0),
        ];
        assert_eq!(grid.pairs(&boxes), vec![(0, 1)]);
    }

    #[test]
    fn test_offscreen_boxes_clamp_to_border() {
        let mut grid = GridBroadPhase::new([4, 4], Vec2::new(100.0, 100.0));
        let boxes = [
            Aabb::new(-50.0, -50.0, -40.0, -40.0),
            Aabb::new(-45.0, -45.0, -30.0, -30.0),
        ];
        assert_eq!(grid.pairs(&boxes), vec![(0, 1)]);
    }

    #[test]
    fn test_clear_between_passes() {
        let mut grid = GridBroadPhase::new([2, 2], Vec2::new(100.0, 100.0));
        let boxes = [Aabb::new(0.0, 0.0, 10.0, 10.0), Aabb::new(5.0, 5.0, 15.0, 15.0)];
        assert_eq!(grid.pairs(&boxes).len(), 1);
        assert!(grid.pairs(&boxes[..1]).is_empty());
    }

    #[test]
    fn test_cells_cover_viewport() {
        let grid = GridBroadPhase::new([4, 2], Vec2::new(800.0, 600.0));
        let cells = grid.cells();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], Aabb::new(0.0, 0.0, 200.0, 300.0));
        assert_eq!(cells[7], Aabb::new(600.0, 300.0, 800.0, 600.0));
    }
}
