//! Turns feature geometry into text labels.

use glam::Vec2;
use log::trace;

use super::feature::polygon_centroid;
use super::params::{DrawRule, Parameters, Properties, StyleParamKey};
use super::transform::apply_text_transform;
use super::LabelStyleBuilder;
use crate::labels::{LabelProducer, LabelType, Transform};
use crate::tile::LabelTile;

/// Feature property used when a rule names no text source.
pub const DEFAULT_TEXT_SOURCE: &str = "name";

const DEFAULT_FONT_FAMILY: &str = "sans-serif";
const DEFAULT_FONT_WEIGHT: &str = "400";
const DEFAULT_FONT_STYLE: &str = "normal";

/// Text label builder for one named style.
#[derive(Debug, Clone)]
pub struct TextStyle {
    name: String,
    sdf: bool,
}

impl TextStyle {
    pub fn new(name: impl Into<String>, sdf: bool) -> Self {
        Self {
            name: name.into(),
            sdf,
        }
    }

    pub fn sdf(&self) -> bool {
        self.sdf
    }

    /// Resolve a draw rule into label parameters at `pixel_scale`.
    pub fn parse_rule(&self, rule: &DrawRule, pixel_scale: f32) -> Parameters {
        let mut p = Parameters::default();

        let family = rule.get_string(StyleParamKey::FontFamily).unwrap_or(DEFAULT_FONT_FAMILY);
        let weight = rule.get_string(StyleParamKey::FontWeight).unwrap_or(DEFAULT_FONT_WEIGHT);
        let style = rule.get_string(StyleParamKey::FontStyle).unwrap_or(DEFAULT_FONT_STYLE);
        p.font_key = format!("{}_{}_{}", family, weight, style);

        if let Some(size) = rule.get_float(StyleParamKey::FontSize) {
            p.font_size = size;
        }
        if let Some(fill) = rule.get_color(StyleParamKey::FontFill) {
            p.fill = fill;
        }
        // A stroke color only counts once a stroke is requested.
        if let Some(stroke) = rule.get_color(StyleParamKey::FontStroke) {
            p.stroke_color = rule.get_color(StyleParamKey::FontStrokeColor).unwrap_or(stroke);
        }
        if let Some(width) = rule.get_float(StyleParamKey::FontStrokeWidth) {
            p.stroke_width = width;
        }
        if let Some(offset) = rule.get_vec2(StyleParamKey::Offset) {
            p.offset = offset;
        }
        if let Some(transform) = rule.get_string(StyleParamKey::Transform) {
            p.transform = transform.parse().unwrap_or_default();
        }
        if let Some(visible) = rule.get_bool(StyleParamKey::Visible) {
            p.visible = visible;
        }
        if let Some(priority) = rule.get_int(StyleParamKey::Priority) {
            p.priority = priority;
        }
        if let Some(source) = rule.get_string(StyleParamKey::TextSource) {
            p.text_source = source.to_string();
        }

        let em = p.font_size / 16.0;
        p.font_size *= pixel_scale;
        p.blur_spread = if self.sdf { em * 5.0 } else { 0.0 };

        p
    }

    /// Label text for a feature, transform applied. `None` when empty.
    ///
    /// An explicit source reads the feature property it names, or is taken
    /// literally when the feature has no such property.
    pub fn apply_text_source(&self, params: &Parameters, props: &Properties) -> Option<String> {
        let text = if params.text_source.is_empty() {
            props.get_string(DEFAULT_TEXT_SOURCE)?
        } else {
            props
                .get_string(&params.text_source)
                .unwrap_or(&params.text_source)
        };

        if text.is_empty() {
            return None;
        }
        Some(apply_text_transform(text, params.transform))
    }

    /// Parse the rule and resolve text. `None` when nothing should be built.
    fn prepare(&self, rule: &DrawRule, props: &Properties, out: &LabelProducer) -> Option<(Parameters, String)> {
        let params = self.parse_rule(rule, out.config().pixel_scale);
        if !params.visible {
            return None;
        }
        let text = self.apply_text_source(&params, props)?;
        Some((params, text))
    }

    fn emit(
        &self,
        params: &Parameters,
        text: &str,
        transform: Transform,
        label_type: LabelType,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> bool {
        out.add_text_label(
            tile,
            &self.name,
            transform,
            text,
            label_type,
            &params.font_spec(),
            params.label_options(),
        )
        .is_some()
    }
}

impl LabelStyleBuilder for TextStyle {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_point(
        &self,
        point: Vec2,
        rule: &DrawRule,
        props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize {
        let Some((params, text)) = self.prepare(rule, props, out) else {
            return 0;
        };
        usize::from(self.emit(&params, &text, Transform::point(point), LabelType::Point, out, tile))
    }

    /// Samples about two anchors per line. Each sampled vertex labels the
    /// segment to its successor; the last vertex pairs with its predecessor.
    fn build_line(
        &self,
        line: &[Vec2],
        rule: &DrawRule,
        props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize {
        let n = line.len();
        if n < 2 {
            return 0;
        }
        let Some((params, text)) = self.prepare(rule, props, out) else {
            return 0;
        };

        let min_length = out.config().min_line_length;
        let stride = (n / 2).max(1);
        let mut built = 0;

        for i in (0..n).step_by(stride) {
            let (p1, p2) = if i + 1 < n {
                (line[i], line[i + 1])
            } else if stride > 1 {
                (line[i], line[i - 1])
            } else {
                continue;
            };

            if p1.distance(p2) < min_length {
                trace!("segment {} of {:?} too short for a label", i, text);
                continue;
            }

            if self.emit(&params, &text, Transform::segment(p1, p2), LabelType::Line, out, tile) {
                built += 1;
            }
        }
        built
    }

    fn build_polygon(
        &self,
        polygon: &[Vec<Vec2>],
        rule: &DrawRule,
        props: &Properties,
        out: &LabelProducer,
        tile: &mut dyn LabelTile,
    ) -> usize {
        let Some(centroid) = polygon_centroid(polygon) else {
            return 0;
        };
        let Some((params, text)) = self.prepare(rule, props, out) else {
            return 0;
        };
        usize::from(self.emit(
            &params,
            &text,
            Transform::point(centroid),
            LabelType::PolygonCentroid,
            out,
            tile,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextTransform;

    #[test]
    fn test_parse_rule_font_key_and_scale() {
        let style = TextStyle::new("labels", true);
        let rule = DrawRule::new()
            .with(StyleParamKey::FontFamily, "Open Sans")
            .with(StyleParamKey::FontWeight, "bold")
            .with(StyleParamKey::FontSize, 32.0_f32)
            .with(StyleParamKey::Transform, "uppercase");

        let p = style.parse_rule(&rule, 2.0);
        assert_eq!(p.font_key, "Open Sans_bold_normal");
        assert_eq!(p.font_size, 64.0);
        // em taken before scaling
        assert_eq!(p.blur_spread, 10.0);
        assert_eq!(p.transform, TextTransform::Uppercase);

        let plain = TextStyle::new("labels", false).parse_rule(&rule, 2.0);
        assert_eq!(plain.blur_spread, 0.0);
    }

    #[test]
    fn test_stroke_color_needs_stroke() {
        let style = TextStyle::new("labels", false);
        let defaults = Parameters::default();

        let only_color = DrawRule::new().with(StyleParamKey::FontStrokeColor, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(style.parse_rule(&only_color, 1.0).stroke_color, defaults.stroke_color);

        let with_stroke = only_color.clone().with(StyleParamKey::FontStroke, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(style.parse_rule(&with_stroke, 1.0).stroke_color, [1.0, 0.0, 0.0, 1.0]);

        let stroke_only = DrawRule::new().with(StyleParamKey::FontStroke, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(style.parse_rule(&stroke_only, 1.0).stroke_color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_text_source_resolution() {
        let style = TextStyle::new("labels", false);
        let props = Properties::new().with("name", "Bergen").with("ref", "E39");

        let mut params = Parameters::default();
        assert_eq!(style.apply_text_source(&params, &props).as_deref(), Some("Bergen"));

        params.text_source = "ref".to_string();
        assert_eq!(style.apply_text_source(&params, &props).as_deref(), Some("E39"));

        params.text_source = "Fjord Road".to_string();
        params.transform = TextTransform::Uppercase;
        assert_eq!(style.apply_text_source(&params, &props).as_deref(), Some("FJORD ROAD"));

        params.text_source.clear();
        assert_eq!(style.apply_text_source(&params, &Properties::new()), None);
        assert_eq!(style.apply_text_source(&params, &Properties::new().with("name", "")), None);
    }
}
