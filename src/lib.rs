//! Label placement and occlusion for tiled maps.
//!
//! Tile workers turn feature geometry into labels through the style
//! builders in [`style`], submitting them via a [`LabelProducer`]. Once per
//! frame the render thread calls [`Labels::update_occlusions`], which merges
//! new labels, drops those whose tiles are gone, projects everything to
//! screen space and hides labels that overlap a winner.
//!
//! ```no_run
//! use std::sync::Arc;
//! use glam::{Mat4, Vec2};
//! use tile_labels::prelude::*;
//!
//! let mut labels = Labels::new(LabelConfig::default(), Arc::new(ApproxFontContext::new()));
//! let producer = labels.producer();
//!
//! let mut tile = MapTile::new(TileId::new(0, 0, 18), Mat4::IDENTITY);
//! let feature = Feature::new(
//!     Geometry::Point(Vec2::new(100.0, 100.0)),
//!     Properties::new().with("name", "Harbour"),
//! );
//! TextStyle::new("places", true).build_feature(&feature, &DrawRule::new(), &producer, &mut tile);
//!
//! let view = ViewState::screen_ortho(18.0, 800.0, 600.0);
//! let stats = labels.update_occlusions(&view, 1.0 / 60.0);
//! println!("{} labels, {} occluded", stats.live, stats.occluded);
//! ```

pub mod config;
pub mod debug;
pub mod error;
pub mod font;
pub mod isect;
pub mod labels;
pub mod style;
pub mod tile;
pub mod view;

pub use config::{BroadPhase, LabelConfig, OcclusionPolicy};
pub use error::{LabelError, LabelResult};
pub use labels::{Label, LabelProducer, LabelState, LabelType, Labels, OcclusionStats};
pub use tile::{LabelTile, MapTile, TileId};
pub use view::ViewState;

/// Everything needed to build and place labels.
pub mod prelude {
    pub use crate::config::{BroadPhase, DiagnosticsConfig, LabelConfig, OcclusionPolicy};
    pub use crate::debug::{DebugRecorder, DebugSink};
    pub use crate::error::{LabelError, LabelResult};
    pub use crate::font::{ApproxFontContext, FontContext, FontSpec, TextBuffer, TextId};
    pub use crate::labels::{
        Label, LabelOptions, LabelProducer, LabelState, LabelType, Labels, OcclusionStats, Transform,
    };
    pub use crate::style::{
        DrawRule, Feature, Geometry, LabelStyleBuilder, Properties, SpriteStyle, StyleParamKey, TextStyle,
        TextTransform,
    };
    pub use crate::tile::{LabelTile, MapTile, TileId};
    pub use crate::view::ViewState;
}
