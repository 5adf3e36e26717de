//! Model-to-screen projection for label anchors.

use glam::{Mat4, Vec2, Vec4};

/// Projects model coordinates to screen pixels for one viewport.
pub struct LabelProjector {
    screen_width: f32,
    screen_height: f32,
}

impl LabelProjector {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            screen_width: viewport.x,
            screen_height: viewport.y,
        }
    }

    /// Project a model position with a combined view-projection × model matrix.
    ///
    /// Returns `None` when the point is behind the camera. Points outside the
    /// frustum still project: labels straddling the screen edge keep their
    /// footprint, and off-screen ones are detected from their bounds.
    pub fn project(&self, position: Vec2, mvp: Mat4) -> Option<Vec2> {
        let clip = mvp * Vec4::new(position.x, position.y, 0.0, 1.0);

        if clip.w <= 0.0001 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;

        // NDC y points up, screen y points down
        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * self.screen_width,
            (1.0 - ndc_y) * 0.5 * self.screen_height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_identity_projection() {
        let proj = LabelProjector::new(Vec2::new(800.0, 600.0));
        let pos = proj.project(Vec2::ZERO, Mat4::IDENTITY).unwrap();
        assert!((pos.x - 400.0).abs() < 1e-3);
        assert!((pos.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_pixel_ortho_roundtrip() {
        let proj = LabelProjector::new(Vec2::new(800.0, 600.0));
        let ortho = Mat4::orthographic_rh(0.0, 800.0, 600.0, 0.0, -1.0, 1.0);
        let pos = proj.project(Vec2::new(120.0, 45.0), ortho).unwrap();
        assert!((pos.x - 120.0).abs() < 1e-3);
        assert!((pos.y - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_behind_camera() {
        let proj = LabelProjector::new(Vec2::new(800.0, 600.0));
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, -20.0), Vec3::Y);
        let projection = Mat4::perspective_rh(1.0, 800.0 / 600.0, 0.1, 100.0);
        // The z = 0 plane is behind a camera looking down -z from z = -10
        assert!(proj.project(Vec2::ZERO, projection * view).is_none());
    }
}
