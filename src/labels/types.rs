//! Label types and data structures.

use glam::Vec2;

use crate::font::TextId;

/// Geometry a label was placed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelType {
    /// Anchored at a point feature.
    Point,
    /// Anchored on a segment of a line feature, rotated along it.
    Line,
    /// Anchored at the vertex centroid of a polygon feature.
    PolygonCentroid,
    /// Icon anchored at a point.
    Sprite,
}

/// Occlusion state machine of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelState {
    /// Created, never updated.
    #[default]
    None,
    /// Updated this frame and waiting for the occlusion pass.
    WaitOcc,
    /// Not occluded in the last pass.
    Visible,
    /// Occluded in the last pass.
    Sleep,
    /// Footprint entirely outside the viewport at the last update.
    OutOfScreen,
}

/// Model-space anchor of a label.
///
/// Point-like labels repeat the same position; line labels carry the two ends
/// of their anchor segment, `position1` being the sampled vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position1: Vec2,
    pub position2: Vec2,
}

impl Transform {
    pub fn point(position: Vec2) -> Self {
        Self {
            position1: position,
            position2: position,
        }
    }

    pub fn segment(start: Vec2, end: Vec2) -> Self {
        Self {
            position1: start,
            position2: end,
        }
    }
}

/// Per-label drawing options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOptions {
    /// Fill color as RGBA (0..1).
    pub color: [f32; 4],
    /// Priority for the priority occlusion policy (higher = more important).
    pub priority: i32,
    /// Offset from the projected anchor in screen pixels.
    pub offset: Vec2,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 1.0],
            priority: 0,
            offset: Vec2::ZERO,
        }
    }
}

impl LabelOptions {
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }
}

/// Rasterized text run backing a text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub text_id: TextId,
    pub font_key: String,
}

/// Label variants sharing one state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelKind {
    Text(TextLabel),
    /// Decorative icon: always drawn, never occluded.
    Sprite,
}
