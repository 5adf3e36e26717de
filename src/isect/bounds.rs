//! Screen-space bounding boxes.

use glam::Vec2;

/// Axis-aligned bounding box in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True when the two boxes share an area larger than zero.
    /// Boxes touching along an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn overlap_area(&self, other: &Aabb) -> f32 {
        let x = (self.max.x.min(other.max.x) - self.min.x.max(other.min.x)).max(0.0);
        let y = (self.max.y.min(other.max.y) - self.min.y.max(other.min.y)).max(0.0);
        x * y
    }

    /// Inclusive containment of a point.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

}

/// Oriented bounding box: a rectangle of `half_extents` rotated by `angle`
/// radians around `center`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Obb {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub angle: f32,
}

impl Obb {
    /// Build from a center, a full size and a rotation.
    pub fn new(center: Vec2, dimension: Vec2, angle: f32) -> Self {
        Self {
            center,
            half_extents: dimension.abs() * 0.5,
            angle,
        }
    }

    /// Unit axes of the box: local x then local y.
    pub fn axes(&self) -> [Vec2; 2] {
        let (sin, cos) = self.angle.sin_cos();
        [Vec2::new(cos, sin), Vec2::new(-sin, cos)]
    }

    /// Corners in winding order.
    pub fn quad(&self) -> [Vec2; 4] {
        let [ax, ay] = self.axes();
        let ex = ax * self.half_extents.x;
        let ey = ay * self.half_extents.y;
        [
            self.center - ex - ey,
            self.center + ex - ey,
            self.center + ex + ey,
            self.center - ex + ey,
        ]
    }

    /// Tightest axis-aligned box around the corners.
    pub fn extent(&self) -> Aabb {
        let quad = self.quad();
        let mut min = quad[0];
        let mut max = quad[0];
        for corner in &quad[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }
        Aabb { min, max }
    }

    /// Separating-axis test. Only overlap with positive area counts.
    pub fn intersects(&self, other: &Obb) -> bool {
        let a = self.quad();
        let b = other.quad();
        let [a0, a1] = self.axes();
        let [b0, b1] = other.axes();

        for axis in [a0, a1, b0, b1] {
            let (a_min, a_max) = project(&a, axis);
            let (b_min, b_max) = project(&b, axis);
            if a_max <= b_min || b_max <= a_min {
                return false;
            }
        }
        true
    }
}

fn project(quad: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    let mut min = quad[0].dot(axis);
    let mut max = min;
    for corner in &quad[1..] {
        let d = corner.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 15.0, 15.0);
        let c = Aabb::new(10.0, 0.0, 20.0, 10.0);
        assert!(a.intersects(&b));
        assert!((a.overlap_area(&b) - 25.0).abs() < 1e-6);
        // shared edge only
        assert!(!a.intersects(&c));
        assert_eq!(a.overlap_area(&c), 0.0);
    }

    #[test]
    fn test_extent_contains_rotated_quad() {
        let obb = Obb::new(Vec2::new(50.0, 40.0), Vec2::new(30.0, 8.0), 0.7);
        let aabb = obb.extent();
        for corner in obb.quad() {
            assert!(aabb.contains_point(corner));
        }
    }

    #[test]
    fn test_axis_aligned_obb_matches_aabb_test() {
        let a = Obb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0), 0.0);
        let b = Obb::new(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0), 0.0);
        let c = Obb::new(Vec2::new(15.0, 5.0), Vec2::new(10.0, 10.0), 0.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rotated_boxes_with_overlapping_extents_can_miss() {
        // Two thin diagonal bars side by side: extents overlap, bars do not.
        let a = Obb::new(Vec2::new(0.0, 0.0), Vec2::new(40.0, 2.0), FRAC_PI_4);
        let b = Obb::new(Vec2::new(10.0, -10.0), Vec2::new(40.0, 2.0), FRAC_PI_4);
        assert!(a.extent().intersects(&b.extent()));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_rotated_cross_intersects() {
        let a = Obb::new(Vec2::ZERO, Vec2::new(40.0, 2.0), FRAC_PI_4);
        let b = Obb::new(Vec2::ZERO, Vec2::new(40.0, 2.0), -FRAC_PI_4);
        assert!(a.intersects(&b));
    }
}
