//! 2D combinators: transforms, booleans, arrays

use super::Sdf2;
use crate::blends::{MaxFunc, MinFunc, hard_max, hard_min};
use crate::bounds::Bounds2;
use crate::errors::ValidationError;
use crate::float_types::{Real, TAU, sawtooth};
use nalgebra::{Matrix3, Point2, Vector2};

/// An affine transform of a field. Distance stays exact for rotation and
/// translation only; the inverse is cached at construction.
pub struct Transform2 {
    sdf: Box<dyn Sdf2>,
    inverse: Matrix3<Real>,
    bb: Bounds2,
}

impl Transform2 {
    pub fn new(sdf: Box<dyn Sdf2>, matrix: Matrix3<Real>) -> Result<Self, ValidationError> {
        let inverse = matrix.try_inverse().ok_or(ValidationError::SingularMatrix)?;
        let bb = sdf.bounding_box().transform(&matrix);
        Ok(Self { sdf, inverse, bb })
    }
}

impl Sdf2 for Transform2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        self.sdf.evaluate(&self.inverse.transform_point(p))
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// A uniform scale. The result is compensated by the scale factor, so the
/// distance stays exact.
pub struct ScaleUniform2 {
    sdf: Box<dyn Sdf2>,
    k: Real,
    inv_k: Real,
    bb: Bounds2,
}

impl ScaleUniform2 {
    pub fn new(sdf: Box<dyn Sdf2>, k: Real) -> Result<Self, ValidationError> {
        if k <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "scale",
                value: k,
            });
        }
        let b = sdf.bounding_box();
        let bb = Bounds2::new(b.min * k, b.max * k);
        Ok(Self {
            sdf,
            k,
            inv_k: 1.0 / k,
            bb,
        })
    }
}

impl Sdf2 for ScaleUniform2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        self.sdf.evaluate(&(*p * self.inv_k)) * self.k
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// The union of any number of fields.
pub struct Union2 {
    children: Vec<Box<dyn Sdf2>>,
    boxes: Vec<Bounds2>,
    min: MinFunc,
    hard: bool,
    bb: Bounds2,
}

impl Union2 {
    pub fn new(children: Vec<Box<dyn Sdf2>>) -> Result<Self, ValidationError> {
        if children.is_empty() {
            return Err(ValidationError::NoOperands("union"));
        }
        let boxes: Vec<Bounds2> = children.iter().map(|c| c.bounding_box()).collect();
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

impl Sdf2 for Union2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        if self.hard {
            // Lower-bound each child from its box and visit nearest-first.
            // A child whose bound cannot beat the running best is skipped.
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

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// The difference of two fields, `s0 - s1`.
pub struct Difference2 {
    s0: Box<dyn Sdf2>,
    s1: Box<dyn Sdf2>,
    max: MaxFunc,
    bb: Bounds2,
}

impl Difference2 {
    pub fn new(s0: Box<dyn Sdf2>, s1: Box<dyn Sdf2>) -> Self {
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

impl Sdf2 for Difference2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        (self.max)(self.s0.evaluate(p), -self.s1.evaluate(p))
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// The intersection of two fields.
pub struct Intersection2 {
    s0: Box<dyn Sdf2>,
    s1: Box<dyn Sdf2>,
    max: MaxFunc,
    bb: Bounds2,
}

impl Intersection2 {
    pub fn new(s0: Box<dyn Sdf2>, s1: Box<dyn Sdf2>) -> Self {
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

impl Sdf2 for Intersection2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        (self.max)(self.s0.evaluate(p), self.s1.evaluate(p))
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// A half-plane cut through a field. The side the normal points to remains.
pub struct Cut2 {
    sdf: Box<dyn Sdf2>,
    a: Point2<Real>,
    n: Vector2<Real>,
    bb: Bounds2,
}

impl Cut2 {
    pub fn new(
        sdf: Box<dyn Sdf2>,
        a: Point2<Real>,
        n: Vector2<Real>,
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

impl Sdf2 for Cut2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        (p - self.a).dot(&self.n).max(self.sdf.evaluate(p))
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// An X by Y array of copies of a field.
pub struct Array2 {
    sdf: Box<dyn Sdf2>,
    num: [usize; 2],
    step: Vector2<Real>,
    min: MinFunc,
    bb: Bounds2,
}

impl Array2 {
    pub fn new(
        sdf: Box<dyn Sdf2>,
        num: [usize; 2],
        step: Vector2<Real>,
    ) -> Result<Self, ValidationError> {
        for (i, &n) in num.iter().enumerate() {
            if n == 0 {
                return Err(ValidationError::ZeroCount {
                    param: ["num.x", "num.y"][i],
                    value: n,
                });
            }
        }
        let bb0 = sdf.bounding_box();
        let shift = Vector2::new(
            step.x * (num[0] - 1) as Real,
            step.y * (num[1] - 1) as Real,
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

impl Sdf2 for Array2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        let mut d = Real::INFINITY;
        for j in 0..self.num[0] {
            for k in 0..self.num[1] {
                let x = p - Vector2::new(j as Real * self.step.x, k as Real * self.step.y);
                d = (self.min)(d, self.sdf.evaluate(&x));
            }
        }
        d
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// N copies of a field rotated about the origin, evaluated by folding the
/// query point into the first sector (one child evaluation per query).
pub struct RotateCopy2 {
    sdf: Box<dyn Sdf2>,
    theta: Real,
    bb: Bounds2,
}

impl RotateCopy2 {
    pub fn new(sdf: Box<dyn Sdf2>, num: usize) -> Result<Self, ValidationError> {
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
            .map(|c| c.coords.norm())
            .fold(0.0, Real::max);
        let d = Vector2::new(rmax, rmax);
        Ok(Self {
            sdf,
            theta: TAU / num as Real,
            bb: Bounds2::new(Point2::from(-d), Point2::from(d)),
        })
    }
}

impl Sdf2 for RotateCopy2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        let r = p.coords.norm();
        let a = sawtooth(p.y.atan2(p.x), self.theta);
        self.sdf.evaluate(&Point2::new(r * a.cos(), r * a.sin()))
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// A distance offset: positive inflates, negative deflates.
pub struct Offset2 {
    sdf: Box<dyn Sdf2>,
    offset: Real,
    bb: Bounds2,
}

impl Offset2 {
    pub fn new(sdf: Box<dyn Sdf2>, offset: Real) -> Self {
        let bb = sdf
            .bounding_box()
            .enlarge(Vector2::new(2.0 * offset, 2.0 * offset));
        Self { sdf, offset, bb }
    }
}

impl Sdf2 for Offset2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        self.sdf.evaluate(p) - self.offset
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}
