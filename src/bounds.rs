//! Axis-aligned bounding boxes
//!
//! Boxes are immutable value types: every operation returns a new box, so
//! sharing one between fields is safe.

use crate::float_types::Real;
use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector2, Vector3};

/// A 2d axis-aligned box, `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Point2<Real>,
    pub max: Point2<Real>,
}

/// A 3d axis-aligned box, `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Point3<Real>,
    pub max: Point3<Real>,
}

impl Bounds2 {
    #[inline]
    pub const fn new(min: Point2<Real>, max: Point2<Real>) -> Self {
        Self { min, max }
    }

    /// A box with the given center and size.
    pub fn centered(center: Point2<Real>, size: Vector2<Real>) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn size(&self) -> Vector2<Real> {
        self.max - self.min
    }

    pub fn center(&self) -> Point2<Real> {
        self.min + self.size() * 0.5
    }

    /// A box enclosing `self` and `other`.
    pub fn extend(&self, other: &Self) -> Self {
        Self::new(
            Point2::from(self.min.coords.inf(&other.min.coords)),
            Point2::from(self.max.coords.sup(&other.max.coords)),
        )
    }

    pub fn translate(&self, v: Vector2<Real>) -> Self {
        Self::new(self.min + v, self.max + v)
    }

    /// A box grown by `v` overall (`v/2` on each side).
    pub fn enlarge(&self, v: Vector2<Real>) -> Self {
        let half = v * 0.5;
        Self::new(self.min - half, self.max + half)
    }

    /// A box scaled by `k` about its own center.
    pub fn scale_about_center(&self, k: Real) -> Self {
        Self::centered(self.center(), self.size() * k)
    }

    pub fn contains(&self, p: &Point2<Real>) -> bool {
        self.min.x <= p.x && self.min.y <= p.y && p.x <= self.max.x && p.y <= self.max.y
    }

    /// Corner vertices: bl, br, tl, tr.
    pub fn corners(&self) -> [Point2<Real>; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            Point2::new(self.min.x, self.max.y),
            self.max,
        ]
    }

    /// The box of the transformed corners. Re-axis-aligning must go through
    /// all four corners, not just min/max, or rotations shrink the box.
    pub fn transform(&self, m: &Matrix3<Real>) -> Self {
        let mut corners = self.corners().into_iter().map(|c| m.transform_point(&c));
        let first = corners.next().unwrap();
        let (min, max) = corners.fold((first, first), |(lo, hi): (Point2<Real>, Point2<Real>), c| {
            (
                Point2::from(lo.coords.inf(&c.coords)),
                Point2::from(hi.coords.sup(&c.coords)),
            )
        });
        Self::new(min, max)
    }

    /// The [min, max] possible distance from `p` to a point of this box.
    /// Used to skip union operands that cannot matter at `p`.
    pub fn distance_interval(&self, p: &Point2<Real>) -> (Real, Real) {
        let mut near2 = 0.0;
        let mut far2 = 0.0;
        for i in 0..2 {
            let lo = self.min[i] - p[i];
            let hi = p[i] - self.max[i];
            let d = lo.max(hi).max(0.0);
            near2 += d * d;
            let f = (p[i] - self.min[i]).abs().max((p[i] - self.max[i]).abs());
            far2 += f * f;
        }
        (near2.sqrt(), far2.sqrt())
    }
}

impl Bounds3 {
    #[inline]
    pub const fn new(min: Point3<Real>, max: Point3<Real>) -> Self {
        Self { min, max }
    }

    /// A box with the given center and size.
    pub fn centered(center: Point3<Real>, size: Vector3<Real>) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn size(&self) -> Vector3<Real> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<Real> {
        self.min + self.size() * 0.5
    }

    /// A box enclosing `self` and `other`.
    pub fn extend(&self, other: &Self) -> Self {
        Self::new(
            Point3::from(self.min.coords.inf(&other.min.coords)),
            Point3::from(self.max.coords.sup(&other.max.coords)),
        )
    }

    pub fn translate(&self, v: Vector3<Real>) -> Self {
        Self::new(self.min + v, self.max + v)
    }

    /// A box grown by `v` overall (`v/2` on each side).
    pub fn enlarge(&self, v: Vector3<Real>) -> Self {
        let half = v * 0.5;
        Self::new(self.min - half, self.max + half)
    }

    /// A box scaled by `k` about its own center.
    pub fn scale_about_center(&self, k: Real) -> Self {
        Self::centered(self.center(), self.size() * k)
    }

    pub fn contains(&self, p: &Point3<Real>) -> bool {
        self.min.x <= p.x
            && self.min.y <= p.y
            && self.min.z <= p.z
            && p.x <= self.max.x
            && p.y <= self.max.y
            && p.z <= self.max.z
    }

    /// The eight corner vertices.
    pub fn corners(&self) -> [Point3<Real>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// The box of the transformed corners. Re-axis-aligning must go through
    /// all eight corners, not just min/max, or rotations shrink the box.
    pub fn transform(&self, m: &Matrix4<Real>) -> Self {
        let mut corners = self.corners().into_iter().map(|c| m.transform_point(&c));
        let first = corners.next().unwrap();
        let (min, max) = corners.fold((first, first), |(lo, hi): (Point3<Real>, Point3<Real>), c| {
            (
                Point3::from(lo.coords.inf(&c.coords)),
                Point3::from(hi.coords.sup(&c.coords)),
            )
        });
        Self::new(min, max)
    }

    /// The [min, max] possible distance from `p` to a point of this box.
    /// Used to skip union operands that cannot matter at `p`.
    pub fn distance_interval(&self, p: &Point3<Real>) -> (Real, Real) {
        let mut near2 = 0.0;
        let mut far2 = 0.0;
        for i in 0..3 {
            let lo = self.min[i] - p[i];
            let hi = p[i] - self.max[i];
            let d = lo.max(hi).max(0.0);
            near2 += d * d;
            let f = (p[i] - self.min[i]).abs().max((p[i] - self.max[i]).abs());
            far2 += f * f;
        }
        (near2.sqrt(), far2.sqrt())
    }
}
