//! 2D primitive fields

use super::{Sdf2, sdf_box2d};
use crate::bounds::Bounds2;
use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use nalgebra::{Point2, Vector2};

/// A circle (exact distance field).
#[derive(Debug, Clone)]
pub struct Circle {
    radius: Real,
    bb: Bounds2,
}

impl Circle {
    pub fn new(radius: Real) -> Result<Self, ValidationError> {
        if radius <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "radius",
                value: radius,
            });
        }
        let d = Vector2::new(radius, radius);
        Ok(Self {
            radius,
            bb: Bounds2::new(Point2::from(-d), Point2::from(d)),
        })
    }
}

impl Sdf2 for Circle {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        p.coords.norm() - self.radius
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// A box of a given full size, optionally with rounded corners (exact
/// distance field).
#[derive(Debug, Clone)]
pub struct Box2 {
    size: Vector2<Real>, // half-extent, inset by the rounding
    round: Real,
    bb: Bounds2,
}

impl Box2 {
    pub fn new(size: Vector2<Real>, round: Real) -> Result<Self, ValidationError> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(ValidationError::NonPositive {
                param: "size",
                value: size.x.min(size.y),
            });
        }
        if round < 0.0 {
            return Err(ValidationError::Negative {
                param: "round",
                value: round,
            });
        }
        let half = size * 0.5;
        let min_half = half.x.min(half.y);
        if round > min_half {
            return Err(ValidationError::RoundTooLarge {
                param: "half-extent",
                value: min_half,
                round,
            });
        }
        Ok(Self {
            size: half - Vector2::new(round, round),
            round,
            bb: Bounds2::new(Point2::from(-half), Point2::from(half)),
        })
    }
}

impl Sdf2 for Box2 {
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        sdf_box2d(p, &self.size) - self.round
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}

/// One polygon edge with its precomputed direction and normal.
#[derive(Debug, Clone, Copy)]
struct Edge {
    a: Point2<Real>,
    b: Point2<Real>,
    v: Vector2<Real>, // direction scaled so t = (p - a).dot(v) is in [0,1] on the segment
    n: Vector2<Real>, // unit normal, +ve side is outside for a ccw loop
}

impl Edge {
    fn new(a: Point2<Real>, b: Point2<Real>) -> Self {
        let ba = b - a;
        let u = ba.normalize();
        Self {
            a,
            b,
            v: ba / ba.dot(&ba),
            n: Vector2::new(u.y, -u.x),
        }
    }

    /// Signed distance to the segment, +ve on the normal side.
    fn distance(&self, p: &Point2<Real>) -> Real {
        let pa = p - self.a;
        let t = pa.dot(&self.v);
        let dn = pa.dot(&self.n);
        if t < 0.0 {
            pa.norm().copysign(dn)
        } else if t > 1.0 {
            (p - self.b).norm().copysign(dn)
        } else {
            dn
        }
    }
}

/// A closed polygon. Inside/outside is decided by winding number, so the
/// vertex order (cw/ccw) does not matter; the loop is closed implicitly.
#[derive(Debug, Clone)]
pub struct Polygon {
    edges: Vec<Edge>,
    bb: Bounds2,
}

impl Polygon {
    pub fn new(points: &[Point2<Real>]) -> Result<Self, ValidationError> {
        if points.len() < 3 {
            return Err(ValidationError::TooFewPoints {
                needed: 3,
                got: points.len(),
            });
        }
        let mut edges = Vec::with_capacity(points.len());
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            if (b - a).norm() <= EPSILON {
                return Err(ValidationError::NonPositive {
                    param: "edge length",
                    value: (b - a).norm(),
                });
            }
            edges.push(Edge::new(a, b));
        }
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = Point2::from(min.coords.inf(&p.coords));
            max = Point2::from(max.coords.sup(&p.coords));
        }
        Ok(Self {
            edges,
            bb: Bounds2::new(min, max),
        })
    }
}

impl Sdf2 for Polygon {
    /// Minimum distance over the edges, signed by a winding-number sweep
    /// folded into the same loop (one pass, O(edges)).
    fn evaluate(&self, p: &Point2<Real>) -> Real {
        let mut dist = Real::INFINITY;
        let mut wn = 0i32;
        for e in &self.edges {
            let d = e.distance(p);
            if d.abs() < dist {
                dist = d.abs();
            }
            // crossing-number accumulation, see geomalgorithms.com a03 inclusion
            if e.a.y <= p.y {
                if e.b.y > p.y && d < 0.0 {
                    wn += 1; // upward crossing, p left of edge
                }
            } else if e.b.y <= p.y && d > 0.0 {
                wn -= 1; // downward crossing, p right of edge
            }
        }
        if wn != 0 { -dist } else { dist }
    }

    fn bounding_box(&self) -> Bounds2 {
        self.bb
    }
}
