//! Central error type for the label pipeline
//!
//! Admission and occlusion never fail hard: they degrade to "no label".
//! `LabelError` carries the reason so callers can log it, and covers the
//! configuration loaders.

/// Errors raised while building labels or loading configuration
#[derive(thiserror::Error, Debug)]
pub enum LabelError {
    #[error("Rasterization error: {0}")]
    Rasterization(String),

    #[error("No active text buffer")]
    NoActiveBuffer,

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    /// Short category tag used as a log prefix
    pub fn category(&self) -> &'static str {
        match self {
            LabelError::Rasterization(_) => "Raster",
            LabelError::NoActiveBuffer => "Buffer",
            LabelError::Config(_) => "Config",
            LabelError::Json(_) => "JSON",
            LabelError::Io(_) => "IO",
        }
    }

    pub fn rasterization<T: ToString>(msg: T) -> Self {
        LabelError::Rasterization(msg.to_string())
    }

    pub fn config<T: ToString>(msg: T) -> Self {
        LabelError::Config(msg.to_string())
    }
}

/// Result type alias for label operations
pub type LabelResult<T> = Result<T, LabelError>;
