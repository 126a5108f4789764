#![forbid(unsafe_code)]

//! Error types.
//!
//! Only configuration can fail. Gesture-time problems (out-of-range drags,
//! taps in the wrong state, input during a transition) are reported as
//! [`crate::state::ShrinkEffect::Noop`] transitions instead.

use thiserror::Error;

use crate::host::ViewId;

/// Why a geometry model could not be derived from the supplied frames.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("container width {width} is too narrow for a docked view (needs more than {min})")]
    ContainerTooNarrow { width: f64, min: f64 },
    #[error("docked size {width}x{height} is degenerate")]
    DegenerateDockedSize { width: f64, height: f64 },
    #[error("aspect ratio {ratio} must be finite and positive")]
    InvalidAspectRatio { ratio: f64 },
    #[error("tracked or container frame contains non-finite values")]
    NonFiniteGeometry,
    #[error("docked center y {final_y} is not below the full center y {initial_y}")]
    DockNotBelow { initial_y: f64, final_y: f64 },
    #[error("docked width {final_width} is not smaller than the full width {initial_width}")]
    DockNotSmaller {
        initial_width: f64,
        final_width: f64,
    },
}

/// Errors surfaced synchronously by [`crate::SwipeShrink`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShrinkError {
    #[error("configuration failed: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("view {} is not available from the host", view.get())]
    ViewUnavailable { view: ViewId },
}

pub type Result<T> = std::result::Result<T, ShrinkError>;
