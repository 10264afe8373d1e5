//! Adaptive quadtree iso-contour extraction, the 2d mirror of the octree
//! walk: implicit cells, center-distance pruning, marching squares leaves.

use super::Render2;
use super::buffer::SegmentBuffer;
use super::dcache::DistanceCache2;
use super::march2::square_segments;
use crate::d2::Sdf2;
use crate::errors::ValidationError;
use crate::float_types::Real;
use nalgebra::Vector2;

/// Marching squares over quadtree space subdivision.
pub struct MarchingSquaresQuadtree {
    mesh_cells: usize,
}

impl MarchingSquaresQuadtree {
    /// `mesh_cells` is the cell count along the longest axis of the bounding
    /// box.
    pub fn new(mesh_cells: usize) -> Result<Self, ValidationError> {
        if mesh_cells == 0 {
            return Err(ValidationError::ZeroCount {
                param: "mesh_cells",
                value: mesh_cells,
            });
        }
        Ok(Self { mesh_cells })
    }

    fn resolution(&self, s: &dyn Sdf2) -> Real {
        let size = s.bounding_box().size();
        size.max() / self.mesh_cells as Real
    }
}

impl Render2 for MarchingSquaresQuadtree {
    fn render(&self, s: &dyn Sdf2, output: &SegmentBuffer) {
        march_quadtree(s, self.resolution(s), output);
    }

    fn info(&self, s: &dyn Sdf2) -> String {
        let size = s.bounding_box().size();
        let resolution = self.resolution(s);
        let cells = size / resolution;
        format!(
            "{}x{}, resolution {:.2}",
            cells.x as i64, cells.y as i64, resolution
        )
    }
}

/// An implicit quadtree cell: lattice origin plus level, side `1 << level`.
#[derive(Clone, Copy)]
struct Cell {
    v: Vector2<i64>,
    level: usize,
}

fn march_quadtree(s: &dyn Sdf2, resolution: Real, output: &SegmentBuffer) {
    let bb = s.bounding_box().scale_about_center(1.01);
    let long_axis = bb.size().max();
    // leaves are tested at the requested resolution, see the octree walk
    let resolution = 0.5 * resolution;
    let levels = (long_axis / resolution).log2().ceil() as usize + 1;
    let dc = DistanceCache2::new(s, bb.min, resolution, levels);
    process_cell(
        &dc,
        Cell {
            v: Vector2::zeros(),
            level: levels - 1,
        },
        output,
    );
    log::debug!(
        "quadtree walk: {} levels, {} samples, {} cache hits",
        levels,
        dc.len(),
        dc.hits()
    );
}

fn is_empty(dc: &DistanceCache2, c: &Cell) -> bool {
    let half = 1i64 << (c.level - 1);
    let (_, d) = dc.evaluate(c.v + Vector2::repeat(half));
    d.abs() >= dc.half_diagonal(c.level)
}

/// Corner offsets of a leaf cell, counter-clockwise from the cell origin.
const LEAF_CORNERS: [Vector2<i64>; 4] = [
    Vector2::new(0, 0),
    Vector2::new(2, 0),
    Vector2::new(2, 2),
    Vector2::new(0, 2),
];

fn process_cell(dc: &DistanceCache2, c: Cell, output: &SegmentBuffer) {
    if is_empty(dc, &c) {
        return;
    }
    if c.level == 1 {
        let mut corners = [nalgebra::Point2::origin(); 4];
        let mut values = [0.0; 4];
        for (i, ofs) in LEAF_CORNERS.iter().enumerate() {
            let (p, d) = dc.evaluate(c.v + ofs);
            corners[i] = p;
            values[i] = d;
        }
        let segments = square_segments(&corners, &values, 0.0);
        if !segments.is_empty() {
            output.write(&segments);
        }
        return;
    }
    let level = c.level - 1;
    let half = 1i64 << level;
    for child in [
        Cell { v: c.v, level },
        Cell { v: c.v + Vector2::new(half, 0), level },
        Cell { v: c.v + Vector2::new(half, half), level },
        Cell { v: c.v + Vector2::new(0, half), level },
    ] {
        process_cell(dc, child, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::d2::Circle;
    use crate::render::to_segments;

    #[test]
    fn circle_extraction_produces_segments() {
        let c = Circle::new(1.0).unwrap();
        let r = MarchingSquaresQuadtree::new(32).unwrap();
        let segments = to_segments(&c, &r);
        assert!(!segments.is_empty());
        for s in &segments {
            for p in &s.0 {
                let d = p.coords.norm();
                assert!((d - 1.0).abs() < 0.1, "vertex radius {d}");
            }
        }
    }

    #[test]
    fn info_reports_cell_counts() {
        let c = Circle::new(2.0).unwrap();
        let r = MarchingSquaresQuadtree::new(8).unwrap();
        assert_eq!(r.info(&c), "8x8, resolution 0.50");
    }
}
