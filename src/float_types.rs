// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// A small positive value for snapping interpolated points and rejecting
/// degenerate geometry.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// A small positive value for snapping interpolated points and rejecting
/// degenerate geometry.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-9;

/// Pi
pub const PI: Real = core::f64::consts::PI as Real;
/// Tau (2π)
pub const TAU: Real = core::f64::consts::TAU as Real;
/// sqrt(1/2), the unit 45-degree component
pub const SQRT_HALF: Real = core::f64::consts::FRAC_1_SQRT_2 as Real;

/// Sawtooth wave centered on x = 0, returning values in [-period/2, period/2).
pub(crate) fn sawtooth(x: Real, period: Real) -> Real {
    let x = x + period / 2.0;
    let t = x / period;
    period * (t - t.floor()) - period / 2.0
}
