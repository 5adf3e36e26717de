//! Point sprites placed through the label pipeline.

use glam::Vec2;

use super::feature::polygon_centroid;
use super::params::{DrawRule, Properties, StyleParamKey};
use super::LabelStyleBuilder;
use crate::labels::{LabelOptions, LabelProducer, Transform};
use crate::tile::LabelTile;

/// Sprite edge length, in pixels before pixel scale, when the rule gives none.
pub const DEFAULT_SPRITE_SIZE: f32 = 16.0;

/// Sprite builder for one named style.
#[derive(Debug, Clone)]
pub struct SpriteStyle {
    name: String,
}

impl SpriteStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Size in pixels and label options, or `None` for invisible rules.
    pub fn parse_rule(&self, rule: &DrawRule, pixel_scale: f32) -> Option<(Vec2, LabelOptions)> {
        if rule.get_bool(StyleParamKey::Visible) == Some(false) {
            return None;
        }
        let size = rule
            .get_vec2(StyleParamKey::SpriteSize)
            .unwrap_or(Vec2::splat(DEFAULT_SPRITE_SIZE))
            * pixel_scale;
        let offset = rule.get_vec2(StyleParamKey::Offset).unwrap_or(Vec2::ZERO);
        let options = LabelOptions::default()
            .with_priority(rule.get_int(StyleParamKey::Priority).unwrap_or(0))
            .with_offset(offset.x, offset.y);
        Some((size, options))
    }

    fn emit(&self, anchor: Vec2, rule: &DrawRule, out: &LabelProducer, tile: &mut dyn LabelTile) -> usize {
        let Some((size, options)) = self.parse_rule(rule, out.config().pixel_scale) else {
            return 0;
        };
        let built = out.add_sprite_label(tile, &self.name, Transform::point(anchor), size, options);
        usize::from(built.is_some())
    }
}

impl LabelStyleBuilder for SpriteStyle {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_point(
        &self,
        point: Vec2,
        rule: &DrawRule,
        _props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize {
        self.emit(point, rule, out, tile)
    }

    /// One sprite at the first vertex.
    fn build_line(
        &self,
        line: &[Vec2],
        rule: &DrawRule,
        _props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize {
        match line.first() {
            Some(&anchor) => self.emit(anchor, rule, out, tile),
            None => 0,
        }
    }

    fn build_polygon(
        &self,
        polygon: &[Vec<Vec2>],
        rule: &DrawRule,
        _props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize {
        match polygon_centroid(polygon) {
            Some(centroid) => self.emit(centroid, rule, out, tile),
            None => 0,
        }
    }
}
