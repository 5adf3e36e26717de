//! Font context interface used to size text labels.
//!
//! Glyph rendering lives outside this crate. The pipeline only needs a unique
//! id per text run and the footprint of the rasterized text.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use glam::Vec2;

use crate::error::{LabelError, LabelResult};

/// Identifier of a text run inside a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextId(pub u32);

/// Font selection for one rasterization request.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// `family_weight_style`
    pub key: String,
    /// Size in pixels, pixel scale already applied.
    pub size: f32,
    /// SDF blur spread in pixels (0 for bitmap text).
    pub blur_spread: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            key: "sans-serif_400_normal".to_string(),
            size: 16.0,
            blur_spread: 0.0,
        }
    }
}

/// A buffer text runs are rasterized into.
pub trait TextBuffer: Send + Sync {
    fn gen_text_id(&self) -> TextId;

    /// Rasterize `text` and return its footprint in pixels.
    fn rasterize(&self, id: TextId, text: &str, font: &FontSpec) -> LabelResult<Vec2>;
}

/// Source of the text buffer currently accepting work.
pub trait FontContext: Send + Sync {
    /// `None` while no buffer is bound; callers retry next frame.
    fn current_buffer(&self) -> Option<Arc<dyn TextBuffer>>;
}

/// Text buffer that sizes text from approximate per-glyph advances.
#[derive(Debug, Default)]
pub struct ApproxTextBuffer {
    next_id: AtomicU32,
}

impl ApproxTextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far.
    pub fn generated(&self) -> u32 {
        self.next_id.load(Ordering::Relaxed)
    }
}

/// Approximate advance of each glyph, as a width in pixels.
pub fn glyph_advances(text: &str, font_size: f32) -> Vec<f32> {
    text.chars()
        .map(|c| {
            if c.is_ascii_uppercase() || c == 'w' || c == 'm' {
                font_size * 0.7
            } else if matches!(c, 'i' | 'l' | '!' | '.' | ',' | '\'' | ' ') {
                font_size * 0.3
            } else {
                font_size * 0.5
            }
        })
        .collect()
}

impl TextBuffer for ApproxTextBuffer {
    fn gen_text_id(&self) -> TextId {
        TextId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn rasterize(&self, _id: TextId, text: &str, font: &FontSpec) -> LabelResult<Vec2> {
        if !(font.size > 0.0) {
            return Err(LabelError::rasterization(format!(
                "font {} has no usable size ({})",
                font.key, font.size
            )));
        }
        if text.trim().is_empty() {
            return Err(LabelError::rasterization("no glyphs to rasterize"));
        }
        if let Some(c) = text.chars().find(|c| c.is_control()) {
            return Err(LabelError::rasterization(format!(
                "no glyph for control character {:?}",
                c
            )));
        }

        let width: f32 = glyph_advances(text, font.size).iter().sum();
        let pad = font.blur_spread * 2.0;
        Ok(Vec2::new(width + pad, font.size + pad))
    }
}

/// Font context over a single `ApproxTextBuffer` that can be unbound.
pub struct ApproxFontContext {
    buffer: RwLock<Option<Arc<ApproxTextBuffer>>>,
}

impl ApproxFontContext {
    /// Context with a bound buffer.
    pub fn new() -> Self {
        Self {
            buffer: RwLock::new(Some(Arc::new(ApproxTextBuffer::new()))),
        }
    }

    /// Context with no bound buffer.
    pub fn unbound() -> Self {
        Self {
            buffer: RwLock::new(None),
        }
    }

    /// Bind a fresh buffer, or unbind with `false`.
    pub fn set_bound(&self, bound: bool) {
        let mut buffer = self.buffer.write().unwrap_or_else(PoisonError::into_inner);
        *buffer = bound.then(|| Arc::new(ApproxTextBuffer::new()));
    }
}

impl Default for ApproxFontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext for ApproxFontContext {
    fn current_buffer(&self) -> Option<Arc<dyn TextBuffer>> {
        let buffer = self.buffer.read().unwrap_or_else(PoisonError::into_inner);
        buffer.clone().map(|b| b as Arc<dyn TextBuffer>)
    }
}
