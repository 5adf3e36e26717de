//! Debug overlay output for label diagnostics.
//!
//! `Labels::draw_debug` feeds label outlines and broad-phase cells into a
//! `DebugSink`. `DebugRecorder` keeps them as segments that a renderer can
//! turn into thin quads.

use glam::Vec2;

/// Receiver of diagnostic shapes in screen pixels.
pub trait DebugSink {
    /// Closed polygon outline.
    fn draw_poly(&mut self, points: &[Vec2], viewport: Vec2);

    /// Axis-aligned rectangle outline.
    fn draw_rect(&mut self, min: Vec2, max: Vec2, viewport: Vec2);
}

/// Kind of shape a debug segment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugShape {
    LabelOutline,
    GridCell,
}

/// One outline edge in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub shape: DebugShape,
}

/// Sink that records every edge it is given.
#[derive(Debug, Default)]
pub struct DebugRecorder {
    segments: Vec<DebugSegment>,
    polys: usize,
    rects: usize,
    viewport: Vec2,
}

impl DebugRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[DebugSegment] {
        &self.segments
    }

    pub fn poly_count(&self) -> usize {
        self.polys
    }

    pub fn rect_count(&self) -> usize {
        self.rects
    }

    /// Viewport of the last shape drawn.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.polys = 0;
        self.rects = 0;
    }

    fn push_loop(&mut self, points: &[Vec2], shape: DebugShape) {
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.segments.push(DebugSegment { start, end, shape });
        }
    }

    /// Triangle vertices `[x, y]` for every segment drawn as a quad of
    /// `width` pixels, 6 vertices per segment. Zero-length segments are skipped.
    pub fn line_vertices(&self, width: f32) -> Vec<f32> {
        let mut vertices = Vec::with_capacity(self.segments.len() * 6 * 2);

        for segment in &self.segments {
            let d = segment.end - segment.start;
            let len = d.length();
            if len < 0.001 {
                continue;
            }

            let p = Vec2::new(-d.y, d.x) / len * width * 0.5;
            let v0 = segment.start + p;
            let v1 = segment.start - p;
            let v2 = segment.end + p;
            let v3 = segment.end - p;

            for v in [v0, v1, v2, v1, v3, v2] {
                vertices.extend_from_slice(&[v.x, v.y]);
            }
        }

        vertices
    }
}

impl DebugSink for DebugRecorder {
    fn draw_poly(&mut self, points: &[Vec2], viewport: Vec2) {
        if points.is_empty() {
            return;
        }
        self.viewport = viewport;
        self.polys += 1;
        self.push_loop(points, DebugShape::LabelOutline);
    }

    fn draw_rect(&mut self, min: Vec2, max: Vec2, viewport: Vec2) {
        self.viewport = viewport;
        self.rects += 1;
        let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
        self.push_loop(&corners, DebugShape::GridCell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_records_four_edges() {
        let mut recorder = DebugRecorder::new();
        recorder.draw_rect(Vec2::ZERO, Vec2::new(10.0, 5.0), Vec2::new(100.0, 100.0));
        assert_eq!(recorder.rect_count(), 1);
        assert_eq!(recorder.segments().len(), 4);
        assert!(recorder
            .segments()
            .iter()
            .all(|s| s.shape == DebugShape::GridCell));
    }

    #[test]
    fn test_line_vertices() {
        let mut recorder = DebugRecorder::new();
        recorder.draw_poly(&[Vec2::ZERO, Vec2::new(10.0, 0.0)], Vec2::ONE);
        // Two edges (there and back), 6 vertices each, 2 floats per vertex
        assert_eq!(recorder.line_vertices(2.0).len(), 2 * 6 * 2);
    }

    #[test]
    fn test_empty_poly_ignored() {
        let mut recorder = DebugRecorder::new();
        recorder.draw_poly(&[], Vec2::ONE);
        assert_eq!(recorder.poly_count(), 0);
    }
}
