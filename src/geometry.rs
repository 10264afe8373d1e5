//! Output primitives produced by the extraction walkers

use crate::float_types::Real;
use nalgebra::{Point2, Point3, Vector3};

/// A 3d triangle. Vertices are counter-clockwise seen from the outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3(pub [Point3<Real>; 3]);

impl Triangle3 {
    pub const fn new(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Self {
        Self([a, b, c])
    }

    /// The non-unit face normal (right-hand rule).
    pub fn normal_raw(&self) -> Vector3<Real> {
        let e1 = self.0[1] - self.0[0];
        let e2 = self.0[2] - self.0[0];
        e1.cross(&e2)
    }

    /// The unit face normal, zero for degenerate triangles.
    pub fn normal(&self) -> Vector3<Real> {
        let n = self.normal_raw();
        let l = n.norm();
        if l == 0.0 { Vector3::zeros() } else { n / l }
    }

    pub fn area(&self) -> Real {
        0.5 * self.normal_raw().norm()
    }

    /// True if the triangle has (near-)zero area.
    pub fn degenerate(&self, tolerance: Real) -> bool {
        self.area() <= tolerance
    }
}

/// A 2d line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2(pub [Point2<Real>; 2]);

impl Segment2 {
    pub const fn new(a: Point2<Real>, b: Point2<Real>) -> Self {
        Self([a, b])
    }

    pub fn length(&self) -> Real {
        (self.0[1] - self.0[0]).norm()
    }

    /// True if the segment has (near-)zero length.
    pub fn degenerate(&self, tolerance: Real) -> bool {
        self.length() <= tolerance
    }
}
