//! Read-only view snapshot consumed by the label pipeline.

use glam::{Mat4, Vec2};

/// Current zoom, viewport and camera of the map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub zoom: f32,
    pub width: f32,
    pub height: f32,
    /// Combined view-projection matrix, world to clip space.
    pub view_proj: Mat4,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 0.0,
            width: 0.0,
            height: 0.0,
            view_proj: Mat4::IDENTITY,
        }
    }
}

impl ViewState {
    pub fn new(zoom: f32, width: f32, height: f32, view_proj: Mat4) -> Self {
        Self {
            zoom,
            width,
            height,
            view_proj,
        }
    }

    /// A view whose world units are screen pixels, y down, origin top-left.
    pub fn screen_ortho(zoom: f32, width: f32, height: f32) -> Self {
        let view_proj = Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0);
        Self::new(zoom, width, height, view_proj)
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
