//! Iso-surface and iso-contour extraction.
//!
//! A renderer walks the field and writes primitives into a shared buffer,
//! which batches them onto a bounded channel. The entry points here stand up
//! the channel, run the walk, and collect the batches on a consumer thread.

pub mod buffer;
pub mod dcache;
pub mod march2;
pub mod march3;
pub mod octree;
pub mod quadtree;

pub use buffer::{SegmentBuffer, TriangleBuffer};
pub use dcache::{DistanceCache2, DistanceCache3};
pub use march2::square_segments;
pub use march3::cube_triangles;
pub use octree::MarchingCubesOctree;
pub use quadtree::MarchingSquaresQuadtree;

use crate::d2::Sdf2;
use crate::d3::Sdf3;
use crate::geometry::{Segment2, Triangle3};

/// A 3d field renderer producing triangles.
pub trait Render3 {
    /// Walk the field, writing triangles to `output`. The buffer is not
    /// closed here; the caller flushes it when the walk returns.
    fn render(&self, sdf: &dyn Sdf3, output: &TriangleBuffer);
    /// A one line description of the sampling volume.
    fn info(&self, sdf: &dyn Sdf3) -> String;
}

/// A 2d field renderer producing line segments.
pub trait Render2 {
    fn render(&self, sdf: &dyn Sdf2, output: &SegmentBuffer);
    fn info(&self, sdf: &dyn Sdf2) -> String;
}

/// Render a 3d field to an in-memory triangle soup.
pub fn to_triangles(sdf: &dyn Sdf3, renderer: &dyn Render3) -> Vec<Triangle3> {
    let (tx, rx) = crossbeam_channel::bounded(buffer::QUEUE_DEPTH);
    let output = TriangleBuffer::new(tx);
    std::thread::scope(|scope| {
        let collector = scope.spawn(move || {
            let mut triangles = Vec::new();
            for batch in rx {
                triangles.extend(batch);
            }
            triangles
        });
        renderer.render(sdf, &output);
        output.close();
        // drop the sender so the collector sees the channel close
        drop(output);
        collector.join().expect("collector thread panicked")
    })
}

/// Render a 2d field to an in-memory segment soup.
pub fn to_segments(sdf: &dyn Sdf2, renderer: &dyn Render2) -> Vec<Segment2> {
    let (tx, rx) = crossbeam_channel::bounded(buffer::QUEUE_DEPTH);
    let output = SegmentBuffer::new(tx);
    std::thread::scope(|scope| {
        let collector = scope.spawn(move || {
            let mut segments = Vec::new();
            for batch in rx {
                segments.extend(batch);
            }
            segments
        });
        renderer.render(sdf, &output);
        output.close();
        drop(output);
        collector.join().expect("collector thread panicked")
    })
}
