//! 3D combinators: transforms, booleans, arrays

use super::Sdf3;
use crate::blends::{MaxFunc, MinFunc, hard_max, hard_min};
use crate::bounds::Bounds3;
use crate::errors::ValidationError;
use crate::float_types::{Real, TAU, sawtooth};
use nalgebra::{Matrix4, Point3, Vector3};

/// An affine transform of a field. Distance stays exact for rotation and
/// translation only; the inverse is cached at construction.
pub struct Transform3 {
    sdf: Box<dyn Sdf3>,
    inverse: Matrix4<Real>,
    bb: Bounds3,
}

impl Transform3 {
    pub fn new(sdf: Box<dyn Sdf3>, matrix: Matrix4<Real>) -> Result<Self, ValidationError> {
        let inverse = matrix.try_inverse().ok_or(ValidationError::SingularMatrix)?;
        let bb = sdf.bounding_box().transform(&matrix);
        Ok(Self { sdf, inverse, bb })
    }
}

impl Sdf3 for Transform3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        self.sdf.evaluate(&self.inverse.transform_point(p))
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// A uniform scale. The result is compensated by the scale factor, so the
/// distance stays exact.
pub struct ScaleUniform3 {
    sdf: Box<dyn Sdf3>,
    k: Real,
    inv_k: Real,
    bb: Bounds3,
}

impl ScaleUniform3 {
    pub fn new(sdf: Box<dyn Sdf3>, k: Real) -> Result<Self, ValidationError> {
        if k <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "scale",
                value: k,
            });
        }
        let b = sdf.bounding_box();
        let bb = Bounds3::new(b.min * k, b.max * k);
        Ok(Self {
            sdf,
            k,
            inv_k: 1.0 / k,
            bb,
        })
    }
}

impl Sdf3 for ScaleUniform3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        self.sdf.evaluate(&(*p * self.inv_k)) * self.k
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// The union of any number of fields.
pub struct Union3 {
    children: Vec<Box<dyn Sdf3>>,
    boxes: Vec<Bounds3>,
    min: MinFunc,
    hard: bool,
    bb: Bounds3,
}

impl Union3 {
    pub fn new(children: Vec<Box<dyn Sdf3>>) -> Result<Self, ValidationError> {
        if children.is_empty() {
            return Err(ValidationError::NoOperands("union"));
        }
        let boxes: Vec<Bounds3> = children.iter().map(|c| c.bounding_box()).collect();
        let bb = boxes[1..].iter().fold(boxes[0], |acc, b| acc.extend(b));
        Ok(Self {
            children,
            boxes,
            min: hard_min(),
            hard: true,
            bb,
        })
    }

    /// Swap the blend. Smooth blends read every operand, so this also turns
    /// off interval pruning.
    pub fn set_min(&mut self, min: MinFunc) {
        self.min = min;
        self.hard = false;
    }
}

impl Sdf3 for Union3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        if self.hard {
            // Lower-bound each child from its box and visit nearest-first.
            // A child whose bound cannot beat the running best is skipped.
            // This cuts most evaluations for spatially-disjoint assemblies.
            let mut order: Vec<(usize, Real)> = self
                .boxes
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    let (near, far) = b.distance_interval(p);
                    (i, if near > 0.0 { near } else { -far })
                })
                .collect();
            order.sort_by(|a, b| a.1.total_cmp(&b.1));
            let mut d = Real::INFINITY;
            for (i, lower) in order {
                if lower >= d {
                    break;
                }
                d = d.min(self.children[i].evaluate(p));
            }
            d
        } else {
            let mut d = self.children[0].evaluate(p);
            for c in &self.children[1..] {
                d = (self.min)(d, c.evaluate(p));
            }
            d
        }
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// The difference of two fields, `s0 - s1`.
pub struct Difference3 {
    s0: Box<dyn Sdf3>,
    s1: Box<dyn Sdf3>,
    max: MaxFunc,
    bb: Bounds3,
}

impl Difference3 {
    pub fn new(s0: Box<dyn Sdf3>, s1: Box<dyn Sdf3>) -> Self {
        let bb = s0.bounding_box();
        Self {
            s0,
            s1,
            max: hard_max(),
            bb,
        }
    }

    pub fn set_max(&mut self, max: MaxFunc) {
        self.max = max;
    }
}

impl Sdf3 for Difference3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        (self.max)(self.s0.evaluate(p), -self.s1.evaluate(p))
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// The intersection of two fields.
pub struct Intersection3 {
    s0: Box<dyn Sdf3>,
    s1: Box<dyn Sdf3>,
    max: MaxFunc,
    bb: Bounds3,
}

impl Intersection3 {
    pub fn new(s0: Box<dyn Sdf3>, s1: Box<dyn Sdf3>) -> Self {
        // conservative: the exact intersection box is not computed
        let bb = s0.bounding_box();
        Self {
            s0,
            s1,
            max: hard_max(),
            bb,
        }
    }

    pub fn set_max(&mut self, max: MaxFunc) {
        self.max = max;
    }
}

impl Sdf3 for Intersection3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        (self.max)(self.s0.evaluate(p), self.s1.evaluate(p))
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// A planar cut through a field along the plane through `a` with normal `n`.
/// The side the normal points to remains.
pub struct Cut3 {
    sdf: Box<dyn Sdf3>,
    a: Point3<Real>,
    n: Vector3<Real>,
    bb: Bounds3,
}

impl Cut3 {
    pub fn new(
        sdf: Box<dyn Sdf3>,
        a: Point3<Real>,
        n: Vector3<Real>,
    ) -> Result<Self, ValidationError> {
        if n.norm() == 0.0 {
            return Err(ValidationError::NonPositive {
                param: "normal length",
                value: 0.0,
            });
        }
        let bb = sdf.bounding_box();
        Ok(Self {
            sdf,
            a,
            n: -n.normalize(),
            bb,
        })
    }
}

impl Sdf3 for Cut3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        (p - self.a).dot(&self.n).max(self.sdf.evaluate(p))
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// An X by Y by Z array of copies of a field.
pub struct Array3 {
    sdf: Box<dyn Sdf3>,
    num: [usize; 3],
    step: Vector3<Real>,
    min: MinFunc,
    bb: Bounds3,
}

impl Array3 {
    pub fn new(
        sdf: Box<dyn Sdf3>,
        num: [usize; 3],
        step: Vector3<Real>,
    ) -> Result<Self, ValidationError> {
        for (i, &n) in num.iter().enumerate() {
            if n == 0 {
                return Err(ValidationError::ZeroCount {
                    param: ["num.x", "num.y", "num.z"][i],
                    value: n,
                });
            }
        }
        let bb0 = sdf.bounding_box();
        let shift = Vector3::new(
            step.x * (num[0] - 1) as Real,
            step.y * (num[1] - 1) as Real,
            step.z * (num[2] - 1) as Real,
        );
        let bb = bb0.extend(&bb0.translate(shift));
        Ok(Self {
            sdf,
            num,
            step,
            min: hard_min(),
            bb,
        })
    }

    pub fn set_min(&mut self, min: MinFunc) {
        self.min = min;
    }
}

impl Sdf3 for Array3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let mut d = Real::INFINITY;
        for j in 0..self.num[0] {
            for k in 0..self.num[1] {
                for l in 0..self.num[2] {
                    let x = p - Vector3::new(
                        j as Real * self.step.x,
                        k as Real * self.step.y,
                        l as Real * self.step.z,
                    );
                    d = (self.min)(d, self.sdf.evaluate(&x));
                }
            }
        }
        d
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// N copies of a field rotated about the z-axis, evaluated by folding the
/// query point into the first sector (one child evaluation per query).
pub struct RotateCopy3 {
    sdf: Box<dyn Sdf3>,
    theta: Real,
    bb: Bounds3,
}

impl RotateCopy3 {
    pub fn new(sdf: Box<dyn Sdf3>, num: usize) -> Result<Self, ValidationError> {
        if num == 0 {
            return Err(ValidationError::ZeroCount {
                param: "num",
                value: num,
            });
        }
        let b = sdf.bounding_box();
        let rmax = b
            .corners()
            .iter()
            .map(|c| Vector3::new(c.x, c.y, 0.0).norm())
            .fold(0.0, Real::max);
        Ok(Self {
            sdf,
            theta: TAU / num as Real,
            bb: Bounds3::new(
                Point3::new(-rmax, -rmax, b.min.z),
                Point3::new(rmax, rmax, b.max.z),
            ),
        })
    }
}

impl Sdf3 for RotateCopy3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        let r = Vector3::new(p.x, p.y, 0.0).norm();
        let a = sawtooth(p.y.atan2(p.x), self.theta);
        self.sdf
            .evaluate(&Point3::new(r * a.cos(), r * a.sin(), p.z))
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}

/// A distance offset: positive inflates, negative deflates.
pub struct Offset3 {
    sdf: Box<dyn Sdf3>,
    offset: Real,
    bb: Bounds3,
}

impl Offset3 {
    pub fn new(sdf: Box<dyn Sdf3>, offset: Real) -> Self {
        let bb = sdf
            .bounding_box()
            .enlarge(Vector3::new(2.0 * offset, 2.0 * offset, 2.0 * offset));
        Self { sdf, offset, bb }
    }
}

impl Sdf3 for Offset3 {
    fn evaluate(&self, p: &Point3<Real>) -> Real {
        self.sdf.evaluate(p) - self.offset
    }

    fn bounding_box(&self) -> Bounds3 {
        self.bb
    }
}
