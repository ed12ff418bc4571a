//! Validation errors
//!
//! The per-step physics never fails. These errors are only produced when
//! obstacles or tuning are validated up front.

use thiserror::Error;

/// Invalid obstacle configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObstacleError {
    #[error("obstacle coordinate `{field}` is not finite ({value})")]
    NonFinite { field: &'static str, value: f32 },

    #[error("segment thickness must be >= 0, got {0}")]
    NegativeThickness(f32),

    #[error("rectangle extent must be >= 0, got {w}x{h}")]
    NegativeExtent { w: f32, h: f32 },
}

/// Errors loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning value `{field}` out of range: {value}")]
    Invalid { field: &'static str, value: f32 },
}
