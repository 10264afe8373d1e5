//! Adaptive octree iso-surface extraction.
//!
//! The walk works on implicit cells (an integer lattice origin plus a level,
//! side = `1 << level` lattice units) rather than a materialized tree, so the
//! only per-walk state is the distance cache. A cell whose center distance is
//! at least the cell half diagonal cannot contain surface (the field is
//! assumed 1-Lipschitz) and is pruned with its whole subtree.

use super::Render3;
use super::buffer::TriangleBuffer;
use super::dcache::DistanceCache3;
use super::march3::cube_triangles;
use crate::d3::Sdf3;
use crate::errors::ValidationError;
use crate::float_types::Real;
use nalgebra::Vector3;

/// Marching cubes over octree space subdivision.
pub struct MarchingCubesOctree {
    mesh_cells: usize,
}

impl MarchingCubesOctree {
    /// `mesh_cells` is the cell count along the longest axis of the bounding
    /// box, e.g. 200.
    pub fn new(mesh_cells: usize) -> Result<Self, ValidationError> {
        if mesh_cells == 0 {
            return Err(ValidationError::ZeroCount {
                param: "mesh_cells",
                value: mesh_cells,
            });
        }
        Ok(Self { mesh_cells })
    }

    fn resolution(&self, s: &dyn Sdf3) -> Real {
        let size = s.bounding_box().size();
        size.max() / self.mesh_cells as Real
    }
}

impl Render3 for MarchingCubesOctree {
    fn render(&self, s: &dyn Sdf3, output: &TriangleBuffer) {
        march_octree(s, self.resolution(s), output);
    }

    fn info(&self, s: &dyn Sdf3) -> String {
        let size = s.bounding_box().size();
        let resolution = self.resolution(s);
        let cells = size / resolution;
        format!(
            "{}x{}x{}, resolution {:.2}",
            cells.x as i64, cells.y as i64, cells.z as i64, resolution
        )
    }
}

/// An implicit octree cell: lattice origin plus level, side `1 << level`.
#[derive(Clone, Copy)]
struct Cell {
    v: Vector3<i64>,
    level: usize,
}

fn march_octree(s: &dyn Sdf3, resolution: Real, output: &TriangleBuffer) {
    // Scale the bounding box about the center so the boundaries aren't on
    // the object surface.
    let bb = s.bounding_box().scale_about_center(1.01);
    let long_axis = bb.size().max();
    // The level 0 cell is at half resolution, so the level 1 leaf is tested
    // for emptiness at the requested resolution.
    let resolution = 0.5 * resolution;
    let levels = (long_axis / resolution).log2().ceil() as usize + 1;
    let dc = DistanceCache3::new(s, bb.min, resolution, levels);
    process_cell(
        &dc,
        Cell {
            v: Vector3::zeros(),
            level: levels - 1,
        },
        output,
    );
    log::debug!(
        "octree walk: {} levels, {} samples, {} cache hits",
        levels,
        dc.len(),
        dc.hits()
    );
}

/// True if the cell cannot contain surface.
fn is_empty(dc: &DistanceCache3, c: &Cell) -> bool {
    let half = 1i64 << (c.level - 1);
    let (_, d) = dc.evaluate(c.v + Vector3::repeat(half));
    d.abs() >= dc.half_diagonal(c.level)
}

/// Corner offsets of a leaf cell, in marching cubes corner order. Leaves are
/// level 1 so the corners sit two lattice units apart.
const LEAF_CORNERS: [Vector3<i64>; 8] = [
    Vector3::new(0, 0, 0),
    Vector3::new(2, 0, 0),
    Vector3::new(2, 2, 0),
    Vector3::new(0, 2, 0),
    Vector3::new(0, 0, 2),
    Vector3::new(2, 0, 2),
    Vector3::new(2, 2, 2),
    Vector3::new(0, 2, 2),
];

/// Cells above this level fan their children out to the thread pool; below
/// it the per-task overhead outweighs the work.
#[cfg(feature = "parallel")]
const PARALLEL_LEVEL: usize = 4;

fn process_cell(dc: &DistanceCache3, c: Cell, output: &TriangleBuffer) {
    if is_empty(dc, &c) {
        return;
    }
    if c.level == 1 {
        let mut corners = [nalgebra::Point3::origin(); 8];
        let mut values = [0.0; 8];
        for (i, ofs) in LEAF_CORNERS.iter().enumerate() {
            let (p, d) = dc.evaluate(c.v + ofs);
            corners[i] = p;
            values[i] = d;
        }
        let triangles = cube_triangles(&corners, &values, 0.0);
        if !triangles.is_empty() {
            output.write(&triangles);
        }
        return;
    }
    let level = c.level - 1;
    let half = 1i64 << level;
    let children = [
        Cell { v: c.v, level },
        Cell { v: c.v + Vector3::new(half, 0, 0), level },
        Cell { v: c.v + Vector3::new(half, half, 0), level },
        Cell { v: c.v + Vector3::new(0, half, 0), level },
        Cell { v: c.v + Vector3::new(0, 0, half), level },
        Cell { v: c.v + Vector3::new(half, 0, half), level },
        Cell { v: c.v + Vector3::new(half, half, half), level },
        Cell { v: c.v + Vector3::new(0, half, half), level },
    ];
    #[cfg(feature = "parallel")]
    if c.level >= PARALLEL_LEVEL {
        rayon::scope(|scope| {
            for child in children {
                scope.spawn(move |_| process_cell(dc, child, output));
            }
        });
        return;
    }
    for child in children {
        process_cell(dc, child, output);
    }
}
