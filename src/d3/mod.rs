//! 3D signed distance fields

pub mod primitives;
pub mod ops;
pub mod extrude;

pub use extrude::{Extrude, Revolve};
pub use ops::{
    Array3, Cut3, Difference3, Intersection3, Offset3, RotateCopy3, ScaleUniform3, Transform3,
    Union3,
};
pub use primitives::{Box3, Cone, Cylinder, Sphere};

use crate::bounds::Bounds3;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A 3d signed distance field.
///
/// `evaluate` must be pure and deterministic: negative inside, positive
/// outside. `bounding_box` must stay stable for the life of the field and
/// contain every point where `evaluate` is <= 0 — the extraction walkers
/// prune cells outside it, so a violation silently loses surface.
pub trait Sdf3: Send + Sync {
    fn evaluate(&self, p: &Point3<Real>) -> Real;
    fn bounding_box(&self) -> Bounds3;
}

impl<T: Sdf3 + ?Sized> Sdf3 for Box<T> {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        (**self).evaluate(p)
    }

    fn bounding_box(&self) -> Bounds3 {
        (**self).bounding_box()
    }
}

impl<T: Sdf3 + ?Sized> Sdf3 for &T {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        (**self).evaluate(p)
    }

    fn bounding_box(&self) -> Bounds3 {
        (**self).bounding_box()
    }
}

/// Distance to a 3d box of half-extent `s` centered on the origin.
pub(crate) fn sdf_box3d(p: &Point3<Real>, s: &Vector3<Real>) -> Real {
    let d = p.coords.abs() - s;
    let outside = Vector3::new(d.x.max(0.0), d.y.max(0.0), d.z.max(0.0)).norm();
    outside + d.x.max(d.y).max(d.z).min(0.0)
}
