//! Blend functions for CSG joins
//!
//! Union/difference/intersection nodes combine operand distances through a
//! swappable binary min/max. The hard variants give sharp edges; the smooth
//! variants fillet the join over a radius `k`.

use crate::float_types::{Real, SQRT_HALF};

/// A minimum function for SDF blending.
pub type MinFunc = Box<dyn Fn(Real, Real) -> Real + Send + Sync>;

/// A maximum function for SDF blending.
pub type MaxFunc = Box<dyn Fn(Real, Real) -> Real + Send + Sync>;

/// The exact minimum. Sharp unions.
pub fn hard_min() -> MinFunc {
    Box::new(Real::min)
}

/// The exact maximum. Sharp intersections/differences.
pub fn hard_max() -> MaxFunc {
    Box::new(Real::max)
}

fn poly(a: Real, b: Real, k: Real) -> Real {
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    (b + (a - b) * h) - k * h * (1.0 - h)
}

/// A polynomial smooth minimum (try k = 0.1, a bigger k gives a bigger fillet).
pub fn poly_min(k: Real) -> MinFunc {
    Box::new(move |a, b| poly(a, b, k))
}

/// A polynomial smooth maximum (try k = 0.1, a bigger k gives a bigger fillet).
pub fn poly_max(k: Real) -> MaxFunc {
    Box::new(move |a, b| -poly(-a, -b, k))
}

/// A minimum that joins the two objects with a quarter-circle of radius `k`.
pub fn round_min(k: Real) -> MinFunc {
    Box::new(move |a, b| {
        let ux = (k - a).max(0.0);
        let uy = (k - b).max(0.0);
        k.max(a.min(b)) - (ux * ux + uy * uy).sqrt()
    })
}

/// A minimum that makes a 45-degree chamfered edge (the diagonal of a square of size `k`).
pub fn chamfer_min(k: Real) -> MinFunc {
    Box::new(move |a, b| a.min(b).min((a - k + b) * SQRT_HALF))
}

/// A minimum with exponential smoothing (k = 32).
pub fn exp_min(k: Real) -> MinFunc {
    Box::new(move |a, b| -((-k * a).exp() + (-k * b).exp()).ln() / k)
}
