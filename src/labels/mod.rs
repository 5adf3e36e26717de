//! Label lifecycle, thread hand-off and per-frame occlusion.
//!
//! Provides:
//! - `Label` with its occlusion state machine
//! - `LabelProducer` for worker threads building tile labels
//! - `Labels`, the render-thread manager running LOD admission, merge/prune
//!   and the broad + narrow phase occlusion pass
//! - Debug drawing of label outlines and broad-phase cells

mod label;
pub mod lod;
mod projection;
mod types;
mod unit;

pub use label::{Label, FADE_SPEED};
pub use lod::{lod_discard, lod_rejects, MAX_LOD};
pub use projection::LabelProjector;
pub use types::{LabelKind, LabelOptions, LabelState, LabelType, TextLabel, Transform};
pub use unit::LabelUnit;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use glam::Vec2;
use log::{debug, info, trace, warn};

use crate::config::{BroadPhase, DiagnosticsConfig, LabelConfig, OcclusionPolicy};
use crate::debug::DebugSink;
use crate::error::LabelError;
use crate::font::{FontContext, FontSpec};
use crate::isect::{narrow_phase, BroadPhaseIndex, GridBroadPhase};
use crate::tile::LabelTile;
use crate::view::ViewState;

/// Counters from one occlusion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OcclusionStats {
    /// Units moved from the pending queue.
    pub merged: usize,
    /// Units dropped because their tile released the label.
    pub pruned: usize,
    /// Labels alive during the pass.
    pub live: usize,
    /// Labels taking part in occlusion.
    pub candidates: usize,
    pub broad_pairs: usize,
    pub intersecting_pairs: usize,
    /// Labels left occluded after the pass.
    pub occluded: usize,
}

/// State shared by the manager and every producer handle.
struct Shared {
    pending: Mutex<Vec<LabelUnit>>,
    view: RwLock<ViewState>,
    font: Arc<dyn FontContext>,
    config: LabelConfig,
}

impl Shared {
    fn pending(&self) -> MutexGuard<'_, Vec<LabelUnit>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn view(&self) -> ViewState {
        *self.view.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish_view(&self, view: ViewState) {
        *self.view.write().unwrap_or_else(PoisonError::into_inner) = view;
    }
}

/// Handle used by worker threads to submit labels for their tiles.
///
/// Cloning is cheap; every clone feeds the same manager.
#[derive(Clone)]
pub struct LabelProducer {
    shared: Arc<Shared>,
}

impl LabelProducer {
    pub fn config(&self) -> &LabelConfig {
        &self.shared.config
    }

    /// View published by the last occlusion pass (or `Labels::set_view`).
    pub fn view(&self) -> ViewState {
        self.shared.view()
    }

    /// Whether labels from a tile at `tile_zoom` pass LOD admission.
    pub fn admits(&self, tile_zoom: i32) -> bool {
        let config = &self.shared.config;
        !lod_rejects(config.max_zoom, config.max_lod, self.shared.view().zoom, tile_zoom)
    }

    /// Build, rasterize and register a text label.
    ///
    /// Returns `None` when the tile fails LOD admission, no text buffer is
    /// bound or the text cannot be rasterized.
    #[allow(clippy::too_many_arguments)]
    pub fn add_text_label(
        &self,
        tile: &mut dyn LabelTile,
        style_name: &str,
        transform: Transform,
        text: &str,
        label_type: LabelType,
        font: &FontSpec,
        options: LabelOptions,
    ) -> Option<Arc<Label>> {
        let tile_id = tile.id();
        if !self.admits(tile_id.z) {
            trace!("LOD discards label {:?} from tile {}", text, tile_id);
            return None;
        }

        let Some(buffer) = self.shared.font.current_buffer() else {
            let err = LabelError::NoActiveBuffer;
            debug!("[{}] dropping label {:?} from tile {}: {}", err.category(), text, tile_id, err);
            return None;
        };

        let text_id = buffer.gen_text_id();
        let dimension = match buffer.rasterize(text_id, text, font) {
            Ok(dimension) => dimension,
            Err(err) => {
                debug!("[{}] dropping label {:?} from tile {}: {}", err.category(), text, tile_id, err);
                return None;
            }
        };

        let label = Arc::new(Label::new_text(
            transform,
            label_type,
            text.to_string(),
            text_id,
            font.key.clone(),
            dimension,
            options,
        ));
        self.add_label(tile, style_name, Arc::clone(&label));
        Some(label)
    }

    /// Build and register a sprite label of `size` pixels.
    pub fn add_sprite_label(
        &self,
        tile: &mut dyn LabelTile,
        style_name: &str,
        transform: Transform,
        size: Vec2,
        options: LabelOptions,
    ) -> Option<Arc<Label>> {
        let tile_id = tile.id();
        if !self.admits(tile_id.z) {
            trace!("LOD discards sprite from tile {}", tile_id);
            return None;
        }

        let label = Arc::new(Label::new_sprite(transform, size, options));
        self.add_label(tile, style_name, Arc::clone(&label));
        Some(label)
    }

    /// Give `label` to `tile` and queue it for the next merge.
    pub fn add_label(&self, tile: &mut dyn LabelTile, style_name: &str, label: Arc<Label>) {
        let view = self.shared.view();
        let model_matrix = tile.model_matrix();
        label.update(view.view_proj * model_matrix, view.viewport(), 0.0);

        let unit = LabelUnit::new(&label, tile.id(), model_matrix, style_name);
        tile.add_label(style_name, label);

        self.shared.pending().push(unit);
    }

    /// Units waiting for the next merge.
    pub fn pending_count(&self) -> usize {
        self.shared.pending().len()
    }
}

/// Render-thread owner of the authoritative label set.
pub struct Labels {
    shared: Arc<Shared>,
    units: Vec<LabelUnit>,
    diagnostics: DiagnosticsConfig,
    last_stats: OcclusionStats,
}

impl Labels {
    pub fn new(config: LabelConfig, font: Arc<dyn FontContext>) -> Self {
        info!("Label manager created: {}", config);
        let diagnostics = config.diagnostics;
        Self {
            shared: Arc::new(Shared {
                pending: Mutex::new(Vec::new()),
                view: RwLock::new(ViewState::default()),
                font,
                config,
            }),
            units: Vec::new(),
            diagnostics,
            last_stats: OcclusionStats::default(),
        }
    }

    /// A handle for worker threads.
    pub fn producer(&self) -> LabelProducer {
        LabelProducer {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.shared.config
    }

    /// Publish a view to producers without running a pass.
    pub fn set_view(&self, view: ViewState) {
        self.shared.publish_view(view);
    }

    pub fn view(&self) -> ViewState {
        self.shared.view()
    }

    /// Units in the authoritative set, including ones whose label died since
    /// the last pass.
    pub fn units(&self) -> &[LabelUnit] {
        &self.units
    }

    pub fn label_count(&self) -> usize {
        self.units.len()
    }

    /// Labels of the authoritative set that are still alive.
    pub fn live_labels(&self) -> Vec<Arc<Label>> {
        self.units.iter().filter_map(LabelUnit::label).collect()
    }

    pub fn last_stats(&self) -> OcclusionStats {
        self.last_stats
    }

    /// Move pending units into the authoritative set and drop dead ones.
    /// Returns `(merged, pruned)`.
    pub fn merge_and_prune(&mut self) -> (usize, usize) {
        let pending = std::mem::take(&mut *self.shared.pending());
        let merged = pending.len();
        self.units.extend(pending);

        let mut pruned = 0;
        let mut i = 0;
        while i < self.units.len() {
            if self.units[i].is_alive() {
                i += 1;
            } else {
                self.units.swap_remove(i);
                pruned += 1;
            }
        }
        (merged, pruned)
    }

    /// Run one frame: merge, prune, update screen geometry, resolve
    /// occlusion and settle every label's state.
    pub fn update_occlusions(&mut self, view: &ViewState, dt: f32) -> OcclusionStats {
        let shared = Arc::clone(&self.shared);
        let config = &shared.config;
        shared.publish_view(*view);

        let (merged, pruned) = self.merge_and_prune();
        let mut stats = OcclusionStats {
            merged,
            pruned,
            ..OcclusionStats::default()
        };

        if view.is_degenerate() {
            warn!("Degenerate viewport {}x{}, labels will be out of screen", view.width, view.height);
        }
        let viewport = view.viewport();

        // Strong references keep every label alive until the pass is over.
        let labels: Vec<Arc<Label>> = self
            .units
            .iter()
            .filter_map(|unit| {
                let label = unit.label()?;
                label.update(view.view_proj * unit.model_matrix(), viewport, dt);
                Some(label)
            })
            .collect();
        stats.live = labels.len();

        let mut owners = Vec::new();
        let mut aabbs = Vec::new();
        let mut obbs = Vec::new();
        for (index, label) in labels.iter().enumerate() {
            if !label.is_occlusion_candidate() {
                continue;
            }
            owners.push(index);
            aabbs.push(label.aabb());
            obbs.push(label.obb());
        }
        stats.candidates = owners.len();

        let mut broad_phase = BroadPhaseIndex::new(config.broad_phase, config.grid_split, viewport);
        let pairs = broad_phase.pairs(&aabbs);
        stats.broad_pairs = pairs.len();

        let occlusions = narrow_phase(&pairs, &aabbs, &obbs);
        stats.intersecting_pairs = occlusions.len();

        for &(a, b) in &occlusions {
            resolve_pair(config.occlusion_policy, &labels[owners[a]], &labels[owners[b]]);
        }

        for label in &labels {
            label.occlusion_solved();
            if label.state() == LabelState::Sleep {
                stats.occluded += 1;
            }
        }

        debug!(
            "Occlusion pass: merged={} pruned={} live={} candidates={} broad={} narrow={} occluded={}",
            stats.merged,
            stats.pruned,
            stats.live,
            stats.candidates,
            stats.broad_pairs,
            stats.intersecting_pairs,
            stats.occluded
        );
        self.last_stats = stats;
        stats
    }

    /// Draw occludable label outlines and the broad-phase grid when label
    /// diagnostics are enabled.
    pub fn draw_debug(&self, sink: &mut dyn DebugSink) {
        if !self.diagnostics.draw_labels {
            return;
        }

        let viewport = self.shared.view().viewport();
        for label in self.units.iter().filter_map(LabelUnit::label) {
            if label.is_occlusion_candidate() {
                sink.draw_poly(&label.obb().quad(), viewport);
            }
        }

        if self.shared.config.broad_phase == BroadPhase::Grid {
            let grid = GridBroadPhase::new(self.shared.config.grid_split, viewport);
            for cell in grid.cells() {
                sink.draw_rect(cell.min, cell.max, viewport);
            }
        }
    }
}

/// Decide which label of an intersecting pair is occluded.
fn resolve_pair(policy: OcclusionPolicy, a: &Label, b: &Label) {
    if policy == OcclusionPolicy::Priority && a.priority() != b.priority() {
        if a.priority() < b.priority() {
            a.set_occlusion(true);
        } else {
            b.set_occlusion(true);
        }
        return;
    }

    // No priorities: the label visible last frame keeps its place.
    if !a.occluded_last_frame() && b.state() == LabelState::WaitOcc {
        b.set_occlusion(true);
    }
    if !b.occluded_last_frame() && a.state() == LabelState::WaitOcc {
        a.set_occlusion(true);
    }
    if !b.occluded_last_frame() {
        a.set_occlusion(true);
    }
}
