//! Marching squares cell polygonizer.
//!
//! Converts one sampled square into 0 to 2 line segments of the iso-contour.
//! Corners are numbered counter-clockwise from the lower left.

use crate::float_types::{EPSILON, Real};
use crate::geometry::Segment2;
use nalgebra::Point2;

/// Trace the iso-contour crossing of a single square.
///
/// Segment endpoints are shared exactly with neighboring cells, so the
/// output chains into closed loops; the direction of travel along a loop is
/// not normalized. Degenerate (zero length) segments are dropped.
pub fn square_segments(p: &[Point2<Real>; 4], v: &[Real; 4], iso: Real) -> Vec<Segment2> {
    let mut index = 0usize;
    for (i, &d) in v.iter().enumerate() {
        if d < iso {
            index |= 1 << i;
        }
    }
    let edges = MS_EDGE_TABLE[index];
    if edges == 0 {
        return Vec::new();
    }
    let mut points = [Point2::origin(); 4];
    for (i, point) in points.iter_mut().enumerate() {
        if edges & (1 << i) != 0 {
            let [a, b] = MS_PAIR_TABLE[i];
            *point = interpolate(&p[a], &p[b], v[a], v[b], iso);
        }
    }
    let table = MS_LINE_TABLE[index];
    let mut result = Vec::with_capacity(table.len() / 2);
    for s in table.chunks_exact(2) {
        let seg = Segment2::new(points[s[1]], points[s[0]]);
        if !seg.degenerate(0.0) {
            result.push(seg);
        }
    }
    result
}

/// Find the iso-contour crossing on the edge between two sampled corners,
/// with the same epsilon snapping as the 3d interpolator.
fn interpolate(
    p1: &Point2<Real>,
    p2: &Point2<Real>,
    v1: Real,
    v2: Real,
    iso: Real,
) -> Point2<Real> {
    let close1 = (iso - v1).abs() < EPSILON;
    let close2 = (iso - v2).abs() < EPSILON;
    if close1 && !close2 {
        return *p1;
    }
    if close2 && !close1 {
        return *p2;
    }
    let t = if close1 && close2 {
        0.5
    } else {
        (iso - v1) / (v2 - v1)
    };
    p1 + (p2 - p1) * t
}

// Vertex pairs for the 4 square edges.
const MS_PAIR_TABLE: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];

// 4 vertices, 16 inside/outside combinations. A set bit marks an edge
// holding a segment end point.
const MS_EDGE_TABLE: [u8; 16] = [
    0x0, 0x9, 0x3, 0xa, 0x6, 0xf, 0x5, 0xc, 0xc, 0x5, 0xf, 0x6, 0xa, 0x3, 0x9, 0x0,
];

// The edges joined to form the segment(s) for each case.
const MS_LINE_TABLE: [&[usize]; 16] = [
    &[],
    &[0, 3],
    &[0, 1],
    &[1, 3],
    &[1, 2],
    &[0, 1, 2, 3],
    &[0, 2],
    &[2, 3],
    &[2, 3],
    &[0, 2],
    &[0, 3, 1, 2],
    &[1, 2],
    &[1, 3],
    &[0, 1],
    &[0, 3],
    &[],
];
