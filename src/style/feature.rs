//! Tile feature geometry handed to style builders.

use glam::Vec2;

use super::params::Properties;

/// Feature type for labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    /// Point feature (city, peak, etc.).
    Point,
    /// Line feature (road, river, etc.).
    Line,
    /// Polygon feature (lake, park, etc.).
    Polygon,
}

/// Feature geometry in tile-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Vec2),
    /// Polyline vertices.
    Line(Vec<Vec2>),
    /// Rings, exterior first.
    Polygon(Vec<Vec<Vec2>>),
}

impl Geometry {
    pub fn feature_type(&self) -> FeatureType {
        match self {
            Geometry::Point(_) => FeatureType::Point,
            Geometry::Line(_) => FeatureType::Line,
            Geometry::Polygon(_) => FeatureType::Polygon,
        }
    }

    /// Unweighted vertex centroid, `None` without vertices.
    pub fn centroid(&self) -> Option<Vec2> {
        match self {
            Geometry::Point(p) => Some(*p),
            Geometry::Line(points) => vertex_centroid(points.iter()),
            Geometry::Polygon(rings) => polygon_centroid(rings),
        }
    }
}

/// Centroid of every vertex of every ring.
pub fn polygon_centroid(rings: &[Vec<Vec2>]) -> Option<Vec2> {
    vertex_centroid(rings.iter().flatten())
}

fn vertex_centroid<'a>(points: impl Iterator<Item = &'a Vec2>) -> Option<Vec2> {
    let (sum, n) = points.fold((Vec2::ZERO, 0usize), |(sum, n), p| (sum + *p, n + 1));
    (n > 0).then(|| sum / n as f32)
}

/// A geometry with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Properties) -> Self {
        Self { geometry, properties }
    }

    pub fn feature_type(&self) -> FeatureType {
        self.geometry.feature_type()
    }
}
