// src/config.rs
// Label pipeline configuration: LOD limits, broad phase choice, occlusion policy, diagnostics
// Loaded from JSON or built in code; injected into `Labels` at construction

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{LabelError, LabelResult};

/// Default maximum zoom of the map view.
pub const DEFAULT_MAX_ZOOM: f32 = 18.0;

/// Default cap of the LOD discard threshold.
pub const DEFAULT_MAX_LOD: i32 = 6;

/// Broad-phase structure used to find candidate label pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BroadPhase {
    /// Uniform grid over the viewport.
    #[default]
    Grid,
    /// R-tree built from all candidate boxes.
    #[serde(alias = "r-tree")]
    RTree,
}

impl FromStr for BroadPhase {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match normalize_key(value).as_str() {
            "grid" | "uniformgrid" => Self::Grid,
            "rtree" | "tree" => Self::RTree,
            _ => return Err("unknown broad phase"),
        })
    }
}

/// Rule used to pick which label of an intersecting pair is suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OcclusionPolicy {
    /// Order-dependent three-step rule driven only by last frame's verdicts.
    #[default]
    Legacy,
    /// Higher priority wins; equal priorities fall back to `Legacy`.
    Priority,
}

impl FromStr for OcclusionPolicy {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match normalize_key(value).as_str() {
            "legacy" | "default" => Self::Legacy,
            "priority" | "prio" => Self::Priority,
            _ => return Err("unknown occlusion policy"),
        })
    }
}

/// Diagnostic switches. Read-only once handed to the manager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Draw label OBBs and broad-phase grid cells through the debug sink.
    pub draw_labels: bool,
}

/// Label manager and style builder configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub max_zoom: f32,
    pub max_lod: i32,
    /// Grid cells along x and y for the grid broad phase.
    pub grid_split: [u32; 2],
    pub broad_phase: BroadPhase,
    pub occlusion_policy: OcclusionPolicy,
    /// Shortest line segment, in tile units, that may carry a label.
    pub min_line_length: f32,
    /// Pixel density factor applied to font and sprite sizes.
    pub pixel_scale: f32,
    pub diagnostics: DiagnosticsConfig,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            max_zoom: DEFAULT_MAX_ZOOM,
            max_lod: DEFAULT_MAX_LOD,
            grid_split: [4, 4],
            broad_phase: BroadPhase::Grid,
            occlusion_policy: OcclusionPolicy::Legacy,
            min_line_length: 0.15,
            pixel_scale: 1.0,
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl LabelConfig {
    /// Parse and validate a JSON configuration. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> LabelResult<Self> {
        let config: LabelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> LabelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!("Loaded label config from {}: {}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> LabelResult<()> {
        if self.grid_split[0] == 0 || self.grid_split[1] == 0 {
            return Err(LabelError::config("grid_split entries must be positive"));
        }
        if !(self.max_zoom > 0.0) {
            return Err(LabelError::config("max_zoom must be positive"));
        }
        if self.max_lod < 0 {
            return Err(LabelError::config("max_lod must not be negative"));
        }
        if !(self.pixel_scale > 0.0) {
            return Err(LabelError::config("pixel_scale must be positive"));
        }
        if !(self.min_line_length >= 0.0) {
            return Err(LabelError::config("min_line_length must not be negative"));
        }
        Ok(())
    }

    pub fn with_broad_phase(mut self, broad_phase: BroadPhase) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    pub fn with_occlusion_policy(mut self, policy: OcclusionPolicy) -> Self {
        self.occlusion_policy = policy;
        self
    }

    pub fn with_grid_split(mut self, x: u32, y: u32) -> Self {
        self.grid_split = [x, y];
        self
    }

    pub fn with_pixel_scale(mut self, scale: f32) -> Self {
        self.pixel_scale = scale;
        self
    }

    pub fn with_debug_labels(mut self, enabled: bool) -> Self {
        self.diagnostics.draw_labels = enabled;
        self
    }
}

impl fmt::Display for LabelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_zoom={} max_lod={} broad_phase={:?} grid={}x{} policy={:?} debug={}",
            self.max_zoom,
            self.max_lod,
            self.broad_phase,
            self.grid_split[0],
            self.grid_split[1],
            self.occlusion_policy,
            self.diagnostics.draw_labels
        )
    }
}

fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_policy() {
        let config = LabelConfig::default();
        assert_eq!(config.grid_split, [4, 4]);
        assert_eq!(config.max_lod, 6);
        assert_eq!(config.broad_phase, BroadPhase::Grid);
        assert_eq!(config.occlusion_policy, OcclusionPolicy::Legacy);
        assert!(!config.diagnostics.draw_labels);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LabelConfig::from_json_str(
            r#"{ "broad_phase": "rtree", "occlusion_policy": "priority",
                 "diagnostics": { "draw_labels": true } }"#,
        )
        .unwrap();
        assert_eq!(config.broad_phase, BroadPhase::RTree);
        assert_eq!(config.occlusion_policy, OcclusionPolicy::Priority);
        assert!(config.diagnostics.draw_labels);
        assert_eq!(config.max_zoom, DEFAULT_MAX_ZOOM);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = LabelConfig::from_json_str(r#"{ "grid_split": [0, 4] }"#).unwrap_err();
        assert!(matches!(err, LabelError::Config(_)));

        let err = LabelConfig::from_json_str(r#"{ "pixel_scale": -1.0 }"#).unwrap_err();
        assert!(matches!(err, LabelError::Config(_)));

        let err = LabelConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, LabelError::Json(_)));
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("R-Tree".parse::<BroadPhase>(), Ok(BroadPhase::RTree));
        assert_eq!("uniform_grid".parse::<BroadPhase>(), Ok(BroadPhase::Grid));
        assert_eq!("PRIORITY".parse::<OcclusionPolicy>(), Ok(OcclusionPolicy::Priority));
        assert!("fancy".parse::<OcclusionPolicy>().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = LabelConfig::from_file("/nonexistent/labels.json").unwrap_err();
        assert!(matches!(err, LabelError::Io(_)));
    }
}
