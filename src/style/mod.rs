//! Style builders: turn tile features into labels.
//!
//! A builder parses the feature's draw rule, resolves its text and hands
//! the result to a [`LabelProducer`], which registers the label with the
//! tile and the manager. Builders run on tile worker threads.

pub mod feature;
pub mod params;
pub mod sprite_style;
pub mod text_style;
pub mod transform;

pub use feature::{polygon_centroid, Feature, FeatureType, Geometry};
pub use params::{DrawRule, Parameters, Properties, StyleParamKey, StyleValue};
pub use sprite_style::SpriteStyle;
pub use text_style::TextStyle;
pub use transform::{apply_text_transform, TextTransform};

use glam::Vec2;

use crate::labels::LabelProducer;
use crate::tile::LabelTile;

/// Builds labels for one geometry kind at a time. Each method returns the
/// number of labels that made it into the tile.
pub trait LabelStyleBuilder: Send + Sync {
    fn name(&self) -> &str;

    fn build_point(
        &self,
        point: Vec2,
        rule: &DrawRule,
        props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize;

    fn build_line(
        &self,
        line: &[Vec2],
        rule: &DrawRule,
        props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize;

    fn build_polygon(
        &self,
        polygon: &[Vec<Vec2>],
        rule: &DrawRule,
        props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize;

    /// Dispatch on the feature's geometry.
    fn build_feature(
        &self,
        feature: &Feature,
        rule: &DrawRule,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize {
        let props = &feature.properties;
        match &feature.geometry {
            Geometry::Point(point) => self.build_point(*point, rule, props, out, tile),
            Geometry::Line(line) => self.build_line(line, rule, props, out, tile),
            Geometry::Polygon(rings) => self.build_polygon(rings, rule, props, out, tile),
        }
    }
}
