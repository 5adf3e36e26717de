//! Draw rules, feature properties and the parameters parsed from them.

use std::collections::HashMap;

use glam::Vec2;

use super::transform::TextTransform;
use crate::font::FontSpec;
use crate::labels::LabelOptions;

/// Style parameters a draw rule can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleParamKey {
    FontFamily,
    FontWeight,
    FontStyle,
    FontSize,
    FontFill,
    FontStroke,
    FontStrokeColor,
    FontStrokeWidth,
    Offset,
    Transform,
    Visible,
    Priority,
    TextSource,
    SpriteSize,
}

/// A typed draw rule value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    String(String),
    Float(f32),
    Int(i32),
    Bool(bool),
    Color([f32; 4]),
    Vec2(Vec2),
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::String(value.to_string())
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Float(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Int(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<[f32; 4]> for StyleValue {
    fn from(value: [f32; 4]) -> Self {
        StyleValue::Color(value)
    }
}

impl From<Vec2> for StyleValue {
    fn from(value: Vec2) -> Self {
        StyleValue::Vec2(value)
    }
}

/// Resolved drawing rule for one feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawRule {
    values: HashMap<StyleParamKey, StyleValue>,
}

impl DrawRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: StyleParamKey, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: StyleParamKey, value: impl Into<StyleValue>) {
        self.values.insert(key, value.into());
    }

    pub fn contains(&self, key: StyleParamKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn get_string(&self, key: StyleParamKey) -> Option<&str> {
        match self.values.get(&key)? {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Floats, with integers widened.
    pub fn get_float(&self, key: StyleParamKey) -> Option<f32> {
        match self.values.get(&key)? {
            StyleValue::Float(v) => Some(*v),
            StyleValue::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Integers, with floats truncated.
    pub fn get_int(&self, key: StyleParamKey) -> Option<i32> {
        match self.values.get(&key)? {
            StyleValue::Int(v) => Some(*v),
            StyleValue::Float(v) => Some(*v as i32),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: StyleParamKey) -> Option<bool> {
        match self.values.get(&key)? {
            StyleValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Colors, also accepting `#rrggbb` / `#rrggbbaa` strings.
    pub fn get_color(&self, key: StyleParamKey) -> Option<[f32; 4]> {
        match self.values.get(&key)? {
            StyleValue::Color(c) => Some(*c),
            StyleValue::String(s) => parse_hex_color(s),
            _ => None,
        }
    }

    /// 2D values, with a single float used for both axes.
    pub fn get_vec2(&self, key: StyleParamKey) -> Option<Vec2> {
        match self.values.get(&key)? {
            StyleValue::Vec2(v) => Some(*v),
            StyleValue::Float(v) => Some(Vec2::splat(*v)),
            _ => None,
        }
    }
}

fn parse_hex_color(value: &str) -> Option<[f32; 4]> {
    let hex = value.strip_prefix('#')?;
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok().map(|c| c as f32 / 255.0);
    let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

/// Feature attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Parameters parsed from a draw rule, consumed by label construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// `family_weight_style`
    pub font_key: String,
    /// Pixels, pixel scale applied.
    pub font_size: f32,
    pub fill: [f32; 4],
    pub stroke_color: [f32; 4],
    pub stroke_width: f32,
    pub text_source: String,
    pub transform: TextTransform,
    pub visible: bool,
    pub priority: i32,
    pub offset: Vec2,
    pub blur_spread: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            font_key: String::new(),
            font_size: 16.0,
            fill: [0.0, 0.0, 0.0, 1.0],
            stroke_color: [1.0, 1.0, 1.0, 1.0],
            stroke_width: 0.0,
            text_source: String::new(),
            transform: TextTransform::None,
            visible: true,
            priority: 0,
            offset: Vec2::ZERO,
            blur_spread: 0.0,
        }
    }
}

impl Parameters {
    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            key: self.font_key.clone(),
            size: self.font_size,
            blur_spread: self.blur_spread,
        }
    }

    pub fn label_options(&self) -> LabelOptions {
        LabelOptions::default()
            .with_color(self.fill)
            .with_priority(self.priority)
            .with_offset(self.offset.x, self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let rule = DrawRule::new()
            .with(StyleParamKey::FontSize, 14)
            .with(StyleParamKey::Priority, 3.7_f32)
            .with(StyleParamKey::Visible, false)
            .with(StyleParamKey::Offset, 2.0_f32)
            .with(StyleParamKey::FontFamily, "Open Sans");

        assert_eq!(rule.get_float(StyleParamKey::FontSize), Some(14.0));
        assert_eq!(rule.get_int(StyleParamKey::Priority), Some(3));
        assert_eq!(rule.get_bool(StyleParamKey::Visible), Some(false));
        assert_eq!(rule.get_vec2(StyleParamKey::Offset), Some(Vec2::splat(2.0)));
        assert_eq!(rule.get_string(StyleParamKey::FontFamily), Some("Open Sans"));
        // wrong type reads as absent
        assert_eq!(rule.get_bool(StyleParamKey::FontSize), None);
        assert_eq!(rule.get_string(StyleParamKey::TextSource), None);
        assert!(rule.contains(StyleParamKey::Visible));
        assert!(!rule.contains(StyleParamKey::FontFill));
    }

    #[test]
    fn test_label_options_carry_fill_priority_offset() {
        let params = Parameters {
            fill: [0.2, 0.4, 0.6, 1.0],
            priority: 7,
            offset: Vec2::new(3.0, -2.0),
            ..Parameters::default()
        };
        let options = params.label_options();
        assert_eq!(options.color, [0.2, 0.4, 0.6, 1.0]);
        assert_eq!(options.priority, 7);
        assert_eq!(options.offset, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_hex_colors() {
        let rule = DrawRule::new()
            .with(StyleParamKey::FontFill, "#ff000080")
            .with(StyleParamKey::FontStrokeColor, "#00ff00")
            .with(StyleParamKey::FontStroke, "red");

        let fill = rule.get_color(StyleParamKey::FontFill).unwrap();
        assert_eq!(fill[0], 1.0);
        assert!((fill[3] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(rule.get_color(StyleParamKey::FontStrokeColor), Some([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(rule.get_color(StyleParamKey::FontStroke), None);
    }

    #[test]
    fn test_properties() {
        let props: Properties = [("name", "Oslo"), ("kind", "city")].into_iter().collect();
        assert_eq!(props.get_string("name"), Some("Oslo"));
        assert_eq!(props.get_string("population"), None);
    }
}
