//! Validation and rendering errors

use crate::float_types::Real;

/// Construction-time parameter validation issues.
///
/// Every shape and combinator constructor checks its parameters up front and
/// returns one of these instead of deferring the failure to evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A parameter that must be strictly positive was not.
    #[error("{param} must be > 0 (got {value})")]
    NonPositive { param: &'static str, value: Real },
    /// A parameter that must be non-negative was not.
    #[error("{param} must be >= 0 (got {value})")]
    Negative { param: &'static str, value: Real },
    /// A rounding radius too large for the shape it rounds.
    #[error("round {round} exceeds {param} {value}")]
    RoundTooLarge {
        param: &'static str,
        value: Real,
        round: Real,
    },
    /// A polygon or point list with too few points.
    #[error("need at least {needed} points (got {got})")]
    TooFewPoints { needed: usize, got: usize },
    /// A count parameter that must be at least one.
    #[error("{param} must be >= 1 (got {value})")]
    ZeroCount { param: &'static str, value: usize },
    /// A combinator constructed with no operands.
    #[error("{0} requires at least one operand")]
    NoOperands(&'static str),
    /// A transform matrix with no inverse.
    #[error("transform matrix is singular")]
    SingularMatrix,
}

/// Failures raised by the rendering / writing pipeline.
///
/// These only surface from the file-level writers at the end of the pipeline;
/// extraction itself is a pure function of the field tree and resolution.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "dxf-io")]
    #[error("dxf: {0}")]
    Dxf(#[from] dxf::DxfError),
    #[cfg(feature = "image-io")]
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
}
