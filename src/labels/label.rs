//! A placeable screen-space label and its occlusion state machine.

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::{Mutex, MutexGuard, PoisonError};

use glam::{Mat4, Vec2};

use super::projection::LabelProjector;
use super::types::{LabelKind, LabelOptions, LabelState, LabelType, TextLabel, Transform};
use crate::font::TextId;
use crate::isect::{Aabb, Obb};

/// Alpha change per second while a label fades in or out.
pub const FADE_SPEED: f32 = 4.0;

/// Screen-space state rewritten by every `update` and occlusion pass.
#[derive(Debug, Clone, Copy, Default)]
struct FrameState {
    screen_position: Vec2,
    rotation: f32,
    obb: Obb,
    aabb: Aabb,
    state: LabelState,
    /// Verdict recorded during the current pass.
    occluded: bool,
    /// Verdict of the previous completed pass.
    occluded_last_frame: bool,
    alpha: f32,
    dt: f32,
}

/// A label shared between its tile (owner) and the label manager (observer).
///
/// Construction data is immutable; the per-frame state sits behind a mutex so
/// the owning tile can read it while the render thread resolves occlusion.
#[derive(Debug)]
pub struct Label {
    kind: LabelKind,
    label_type: LabelType,
    transform: Transform,
    dimension: Vec2,
    options: LabelOptions,
    frame: Mutex<FrameState>,
}

impl Label {
    /// A text label whose footprint came from rasterizing `text`.
    #[allow(clippy::too_many_arguments)]
    pub fn new_text(
        transform: Transform,
        label_type: LabelType,
        text: String,
        text_id: TextId,
        font_key: String,
        dimension: Vec2,
        options: LabelOptions,
    ) -> Self {
        Self::new(
            LabelKind::Text(TextLabel {
                text,
                text_id,
                font_key,
            }),
            label_type,
            transform,
            dimension,
            options,
        )
    }

    /// A sprite of `size` pixels anchored at `transform.position1`.
    pub fn new_sprite(transform: Transform, size: Vec2, options: LabelOptions) -> Self {
        Self::new(LabelKind::Sprite, LabelType::Sprite, transform, size, options)
    }

    fn new(
        kind: LabelKind,
        label_type: LabelType,
        transform: Transform,
        dimension: Vec2,
        options: LabelOptions,
    ) -> Self {
        Self {
            kind,
            label_type,
            transform,
            dimension,
            options,
            frame: Mutex::new(FrameState::default()),
        }
    }

    fn frame(&self) -> MutexGuard<'_, FrameState> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn kind(&self) -> &LabelKind {
        &self.kind
    }

    pub fn label_type(&self) -> LabelType {
        self.label_type
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn dimension(&self) -> Vec2 {
        self.dimension
    }

    pub fn options(&self) -> &LabelOptions {
        &self.options
    }

    pub fn priority(&self) -> i32 {
        self.options.priority
    }

    /// Text content for text labels.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            LabelKind::Text(text) => Some(&text.text),
            LabelKind::Sprite => None,
        }
    }

    /// Sprites are exempt from occlusion.
    pub fn can_occlude(&self) -> bool {
        match self.kind {
            LabelKind::Text(_) => true,
            LabelKind::Sprite => false,
        }
    }

    /// Whether the label competes for space in the current pass: an
    /// occludable label whose last `update` put it on screen.
    pub fn is_occlusion_candidate(&self) -> bool {
        self.can_occlude() && !matches!(self.state(), LabelState::None | LabelState::OutOfScreen)
    }

    pub fn state(&self) -> LabelState {
        self.frame().state
    }

    /// Record this frame's verdict. Setting the same value twice is a no-op.
    pub fn set_occlusion(&self, occluded: bool) {
        self.frame().occluded = occluded;
    }

    /// Verdict of the previous pass, or `true` once the label has been
    /// occluded during the current one.
    pub fn occluded_last_frame(&self) -> bool {
        let frame = self.frame();
        frame.occluded_last_frame || frame.occluded
    }

    /// Finalize the current pass: settle `WaitOcc` into `Visible` or `Sleep`,
    /// keep the verdict for the next pass and advance the fade.
    pub fn occlusion_solved(&self) {
        let can_occlude = self.can_occlude();
        let mut frame = self.frame();

        let occluded = can_occlude && frame.occluded;
        if frame.state == LabelState::WaitOcc {
            frame.state = if occluded {
                LabelState::Sleep
            } else {
                LabelState::Visible
            };
        }
        frame.occluded_last_frame = occluded;
        frame.occluded = false;

        let target = match frame.state {
            LabelState::Visible => 1.0,
            _ => 0.0,
        };
        let step = FADE_SPEED * frame.dt;
        frame.alpha = if frame.alpha < target {
            (frame.alpha + step).min(target)
        } else {
            (frame.alpha - step).max(target)
        };
    }

    /// Screen-space bounds from the last `update`.
    pub fn aabb(&self) -> Aabb {
        self.frame().aabb
    }

    pub fn obb(&self) -> Obb {
        self.frame().obb
    }

    pub fn screen_position(&self) -> Vec2 {
        self.frame().screen_position
    }

    /// Rotation in radians, kept within [-π/2, π/2] so text stays upright.
    pub fn rotation(&self) -> f32 {
        self.frame().rotation
    }

    /// Fade alpha in [0, 1].
    pub fn alpha(&self) -> f32 {
        self.frame().alpha
    }

    /// Whether the renderer should draw the label this frame.
    pub fn is_visible(&self) -> bool {
        self.frame().state == LabelState::Visible
    }

    /// Recompute screen geometry from `mvp` (view-projection × model) and the
    /// viewport, and re-enter the state machine for a new frame. `dt` is the
    /// frame time in seconds used by the fade.
    pub fn update(&self, mvp: Mat4, viewport: Vec2, dt: f32) {
        let projector = LabelProjector::new(viewport);
        let p1 = projector.project(self.transform.position1, mvp);
        let p2 = projector.project(self.transform.position2, mvp);

        let mut frame = self.frame();
        frame.dt = dt;

        let (Some(p1), Some(p2)) = (p1, p2) else {
            // behind the camera: no footprint this frame
            frame.screen_position = Vec2::ZERO;
            frame.rotation = 0.0;
            frame.obb = Obb::default();
            frame.aabb = Aabb::default();
            frame.state = LabelState::OutOfScreen;
            return;
        };

        let (position, rotation) = match self.label_type {
            LabelType::Line => ((p1 + p2) * 0.5, upright_angle(p2 - p1)),
            _ => (p1, 0.0),
        };

        frame.screen_position = position + self.options.offset;
        frame.rotation = rotation;
        frame.obb = Obb::new(frame.screen_position, self.dimension, rotation);
        frame.aabb = frame.obb.extent();

        let screen = Aabb::new(0.0, 0.0, viewport.x, viewport.y);
        frame.state = if !frame.aabb.intersects(&screen) {
            LabelState::OutOfScreen
        } else if self.can_occlude() {
            LabelState::WaitOcc
        } else {
            LabelState::Visible
        };
    }
}

/// Angle of a screen-space direction, flipped by π when text along it would
/// read upside down.
fn upright_angle(direction: Vec2) -> f32 {
    if direction.length_squared() == 0.0 {
        return 0.0;
    }
    let angle = direction.y.atan2(direction.x);
    if angle > FRAC_PI_2 {
        angle - PI
    } else if angle < -FRAC_PI_2 {
        angle + PI
    } else {
        angle
    }
}
