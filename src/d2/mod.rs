//! 2D signed distance fields

pub mod primitives;
pub mod ops;

pub use ops::{
    Array2, Cut2, Difference2, Intersection2, Offset2, RotateCopy2, ScaleUniform2, Transform2,
    Union2,
};
pub use primitives::{Box2, Circle, Polygon};

use crate::bounds::Bounds2;
use crate::float_types::Real;
use nalgebra::{Point2, Vector2};

/// A 2d signed distance field.
///
/// `evaluate` must be pure and deterministic: negative inside, positive
/// outside. `bounding_box` must stay stable for the life of the field and
/// contain every point where `evaluate` is <= 0 — the extraction walkers
/// prune cells outside it, so a violation silently loses surface.
pub trait Sdf2: Send + Sync {
    fn evaluate(&self, p: &Point2<Real>) -> Real;
    fn bounding_box(&self) -> Bounds2;
}

impl<T: Sdf2 + ?Sized> Sdf2 for Box<T> {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        (**self).evaluate(p)
    }

    fn bounding_box(&self) -> Bounds2 {
        (**self).bounding_box()
    }
}

impl<T: Sdf2 + ?Sized> Sdf2 for &T {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        (**self).evaluate(p)
    }

    fn bounding_box(&self) -> Bounds2 {
        (**self).bounding_box()
    }
}

/// Distance to a 2d box of half-extent `s` centered on the origin.
pub(crate) fn sdf_box2d(p: &Point2<Real>, s: &Vector2<Real>) -> Real {
    let d = p.coords.abs() - s;
    let outside = Vector2::new(d.x.max(0.0), d.y.max(0.0)).norm();
    outside + d.x.max(d.y).min(0.0)
}
