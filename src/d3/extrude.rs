//! Lifting 2D fields into 3D: extrusion and solids of revolution

use super::Sdf3;
use crate::bounds::{Bounds2, Bounds3};
use crate::d2::Sdf2;
use crate::errors::ValidationError;
use crate::float_types::{PI, Real, TAU};
use nalgebra::{Point2, Point3, Rotation2, Vector2};

/// Maps a 3d query point to the 2d point used to evaluate the profile.
pub type ExtrudeFunc = Box<dyn Fn(&Point3<Real>) -> Point2<Real> + Send + Sync>;

/// Straight extrusion along z.
pub fn normal_extrude() -> ExtrudeFunc {
    Box::new(|p| Point2::new(p.x, p.y))
}

/// An extrusion that twists with z, `twist` radians over the full height.
pub fn twist_extrude(height: Real, twist: Real) -> ExtrudeFunc {
    let k = twist / height;
    Box::new(move |p| Rotation2::new(p.z * k).transform_point(&Point2::new(p.x, p.y)))
}

/// An extrusion that scales with z, reaching `scale` at the top.
pub fn scale_extrude(height: Real, scale: Vector2<Real>) -> ExtrudeFunc {
    let inv = Vector2::new(1.0 / scale.x, 1.0 / scale.y);
    let m = (inv - Vector2::new(1.0, 1.0)) / height; // slope
    let b = inv * 0.5 + Vector2::new(0.5, 0.5); // intercept
    Box::new(move |p| {
        let s = m * p.z + b;
        Point2::new(p.x * s.x, p.y * s.y)
    })
}

/// A 2d profile extruded along z. The extrusion mapping is swappable, so the
/// same node covers straight, twisted and scaled extrusions. Distances are
/// conservative (not metric-exact) for the non-straight mappings.
pub struct Extrude {
    sdf: Box<dyn Sdf2>,
    height: Real, // half-height
    extrude: ExtrudeFunc,
    bb: Bounds3,
}

impl Extrude {
    pub fn new(sdf: Box<dyn Sdf2>, height: Real) -> Result<Self, ValidationError> {
        if height <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "height",
                value: height,
            });
        }
        let bb = sdf.bounding_box();
        let half = height / 2.0;
        Ok(Self {
            sdf,
            height: half,
            extrude: normal_extrude(),
            bb: prism_bounds(&bb, half),
        })
    }

    /// An extrusion rotating by `twist` radians over the height.
    pub fn twisted(sdf: Box<dyn Sdf2>, height: Real, twist: Real) -> Result<Self, ValidationError> {
        let mut s = Self::new(sdf, height)?;
        // any point of the profile can swing through the full circle
        let b = s.sdf.bounding_box();
        let l = b
            .corners()
            .iter()
            .map(|c| c.coords.norm())
            .fold(0.0, Real::max);
        s.bb = Bounds3::new(
            Point3::new(-l, -l, -s.height),
            Point3::new(l, l, s.height),
        );
        s.extrude = twist_extrude(height, twist);
        Ok(s)
    }

    /// An extrusion scaled to `scale` at the top of the height.
    pub fn scaled(
        sdf: Box<dyn Sdf2>,
        height: Real,
        scale: Vector2<Real>,
    ) -> Result<Self, ValidationError> {
        if scale.x <= 0.0 || scale.y <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "scale",
                value: scale.x.min(scale.y),
            });
        }
        let mut s = Self::new(sdf, height)?;
        let b = s.sdf.bounding_box();
        let scaled = Bounds2::new(
            Point2::new(b.min.x * scale.x, b.min.y * scale.y),
            Point2::new(b.max.x * scale.x, b.max.y * scale.y),
        );
        s.bb = prism_bounds(&b.extend(&scaled), s.height);
        s.extrude = scale_extrude(height, scale);
        Ok(s)
    }

    /// Swap the extrusion mapping. The bounding box is not recomputed, so the
    /// new mapping must keep the profile within the current box.
    pub fn set_extrude(&mut self, extrude: ExtrudeFunc) {
        self.extrude = extrude;
    }
}

fn prism_bounds(b: &Bounds2, half_height: Real) -> Bounds3 {
    Bounds3::new(
        Point3::new(b.min.x, b.min.y, -half_height),
        Point3::new(b.max.x, b.max.y, half_height),
    )
}

impl Sdf3 for Extrude {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        // intersect the projected profile with the z slab
        let a = self.sdf.evaluate(&(self.extrude)(p));
        let b = p.z.abs() - self.height;
        a.max(b)
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// A solid of revolution about the z-axis: the profile's +x half-plane swept
/// through `theta` radians (0 means a full revolution).
pub struct Revolve {
    sdf: Box<dyn Sdf2>,
    theta: Real,
    norm: Vector2<Real>, // precomputed normal to the theta limit plane
    bb: Bounds3,
}

impl Revolve {
    pub fn new(sdf: Box<dyn Sdf2>) -> Result<Self, ValidationError> {
        Self::partial(sdf, 0.0)
    }

    pub fn partial(sdf: Box<dyn Sdf2>, theta: Real) -> Result<Self, ValidationError> {
        if theta < 0.0 {
            return Err(ValidationError::Negative {
                param: "theta",
                value: theta,
            });
        }
        let theta = theta.abs() % TAU;
        let (sin, cos) = theta.sin_cos();
        // the swept sector's xy extent, as unit-circle samples
        let mut vset: Vec<Vector2<Real>> = if theta == 0.0 {
            vec![Vector2::new(1.0, 1.0), Vector2::new(-1.0, -1.0)]
        } else {
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(cos, sin),
            ]
        };
        if theta > 0.5 * PI {
            vset.push(Vector2::new(0.0, 1.0));
        }
        if theta > PI {
            vset.push(Vector2::new(-1.0, 0.0));
        }
        if theta > 1.5 * PI {
            vset.push(Vector2::new(0.0, -1.0));
        }
        let b = sdf.bounding_box();
        let l = b.min.x.abs().max(b.max.x.abs());
        let (mut vmin, mut vmax) = (vset[0], vset[0]);
        for v in &vset[1..] {
            vmin = vmin.inf(v);
            vmax = vmax.sup(v);
        }
        let (vmin, vmax) = (vmin * l, vmax * l);
        Ok(Self {
            sdf,
            theta,
            norm: Vector2::new(-sin, cos),
            bb: Bounds3::new(
                Point3::new(vmin.x, vmin.y, b.min.y),
                Point3::new(vmax.x, vmax.y, b.max.y),
            ),
        })
    }
}

impl Sdf3 for Revolve {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let x = (p.x * p.x + p.y * p.y).sqrt();
        let a = self.sdf.evaluate(&Point2::new(x, p.z));
        let mut b = a;
        if self.theta != 0.0 {
            // two vertical planes forming the sector wedge
            let d = self.norm.dot(&Vector2::new(p.x, p.y));
            if self.theta < PI {
                b = (-p.y).max(d); // intersect
            } else {
                b = (-p.y).min(d); // union
            }
        }
        a.max(b)
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}
