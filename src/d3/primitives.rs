//! 3D primitive fields

use super::{Sdf3, sdf_box3d};
use crate::bounds::Bounds3;
use crate::d2::sdf_box2d;
use crate::errors::ValidationError;
use crate::float_types::Real;
use nalgebra::{Point2, Point3, Vector2, Vector3};

/// A sphere (exact distance field).
#[derive(Debug, Clone)]
pub struct Sphere {
    radius: Real,
    bb: Bounds3,
}

impl Sphere {
    pub fn new(radius: Real) -> Result<Self, ValidationError> {
        if radius <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "radius",
                value: radius,
            });
        }
        let d = Vector3::new(radius, radius, radius);
        Ok(Self {
            radius,
            bb: Bounds3::new(Point3::from(-d), Point3::from(d)),
        })
    }
}

impl Sdf3 for Sphere {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        p.coords.norm() - self.radius
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// A box of a given full size, optionally with rounded edges (exact
/// distance field).
#[derive(Debug, Clone)]
pub struct Box3 {
    size: Vector3<Real>, // half-extent, inset by the rounding
    round: Real,
    bb: Bounds3,
}

impl Box3 {
    pub fn new(size: Vector3<Real>, round: Real) -> Result<Self, ValidationError> {
        if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "size",
                value: size.x.min(size.y).min(size.z),
            });
        }
        if round < 0.0 {
            return Err(ValidationError::Negative {
                param: "round",
                value: round,
            });
        }
        let half = size * 0.5;
        let min_half = half.x.min(half.y).min(half.z);
        if round > min_half {
            return Err(ValidationError::RoundTooLarge {
                param: "half-extent",
                value: min_half,
                round,
            });
        }
        Ok(Self {
            size: half - Vector3::new(round, round, round),
            round,
            bb: Bounds3::new(Point3::from(-half), Point3::from(half)),
        })
    }
}

impl Sdf3 for Box3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        sdf_box3d(p, &self.size) - self.round
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// A z-axis cylinder, optionally with rounded edges (exact distance field).
/// The distance is the 2d rounded-box profile swept around the axis.
#[derive(Debug, Clone)]
pub struct Cylinder {
    height: Real, // half-height, inset by the rounding
    radius: Real, // radius, inset by the rounding
    round: Real,
    bb: Bounds3,
}

impl Cylinder {
    pub fn new(height: Real, radius: Real, round: Real) -> Result<Self, ValidationError> {
        if radius <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "radius",
                value: radius,
            });
        }
        if round < 0.0 {
            return Err(ValidationError::Negative {
                param: "round",
                value: round,
            });
        }
        if round > radius {
            return Err(ValidationError::RoundTooLarge {
                param: "radius",
                value: radius,
                round,
            });
        }
        if height < 2.0 * round {
            return Err(ValidationError::RoundTooLarge {
                param: "half-height",
                value: height / 2.0,
                round,
            });
        }
        let d = Vector3::new(radius, radius, height / 2.0);
        Ok(Self {
            height: height / 2.0 - round,
            radius: radius - round,
            round,
            bb: Bounds3::new(Point3::from(-d), Point3::from(d)),
        })
    }

    /// A capsule is a cylinder rounded by its own radius.
    pub fn capsule(height: Real, radius: Real) -> Result<Self, ValidationError> {
        Self::new(height, radius, radius)
    }
}

impl Sdf3 for Cylinder {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let q = Point2::new(Vector2::new(p.x, p.y).norm(), p.z);
        sdf_box2d(&q, &Vector2::new(self.radius, self.height)) - self.round
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// A truncated z-axis cone, optionally with rounded edges (exact distance
/// field). The slope direction and normal are precomputed at construction.
#[derive(Debug, Clone)]
pub struct Cone {
    r0: Real, // base radius, inset for the rounding
    r1: Real, // top radius, inset for the rounding
    height: Real, // half-height, inset for the rounding
    round: Real,
    u: Vector2<Real>, // unit cone slope
    n: Vector2<Real>, // outward normal to the slope
    l: Real,          // slope length
    bb: Bounds3,
}

impl Cone {
    pub fn new(height: Real, r0: Real, r1: Real, round: Real) -> Result<Self, ValidationError> {
        if height <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "height",
                value: height,
            });
        }
        if r0 <= 0.0 || r1 <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "radius",
                value: r0.min(r1),
            });
        }
        if round < 0.0 {
            return Err(ValidationError::Negative {
                param: "round",
                value: round,
            });
        }
        if height < 2.0 * round {
            return Err(ValidationError::RoundTooLarge {
                param: "half-height",
                value: height / 2.0,
                round,
            });
        }
        let half = height / 2.0;
        let u = (Vector2::new(r1, half) - Vector2::new(r0, -half)).normalize();
        let n = Vector2::new(u.y, -u.x);
        let ofs = round / n.x;
        let r0i = r0 - (1.0 + n.y) * ofs;
        let r1i = r1 - (1.0 - n.y) * ofs;
        let hi = half - round;
        let l = (Vector2::new(r1i, hi) - Vector2::new(r0i, -hi)).norm();
        let r = (r0i + round).max(r1i + round);
        Ok(Self {
            r0: r0i,
            r1: r1i,
            height: hi,
            round,
            u,
            n,
            l,
            bb: Bounds3::new(Point3::new(-r, -r, -half), Point3::new(r, r, half)),
        })
    }
}

impl Sdf3 for Cone {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        // radial profile coordinates
        let p2 = Vector2::new(Vector2::new(p.x, p.y).norm(), p.z);
        // above the cone
        if p2.y >= self.height && p2.x <= self.r1 {
            return p2.y - self.height - self.round;
        }
        // below the cone
        if p2.y <= -self.height && p2.x <= self.r0 {
            return -p2.y - self.height - self.round;
        }
        let v = p2 - Vector2::new(self.r0, -self.height);
        let d_slope = v.dot(&self.n);
        // inside
        if d_slope < 0.0 && p2.y.abs() < self.height {
            return -(-d_slope).min(self.height - p2.y.abs()) - self.round;
        }
        // closest to the slope line
        let t = v.dot(&self.u);
        if t >= 0.0 && t <= self.l {
            return d_slope - self.round;
        }
        // closest to the base vertex
        if t < 0.0 {
            return v.norm() - self.round;
        }
        // closest to the top vertex
        (p2 - Vector2::new(self.r1, self.height)).norm() - self.round
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}
