//! Batching buffers between the extraction walkers and the output consumer.
//!
//! Walkers emit a handful of primitives per leaf cell. Sending each one over
//! the channel would swamp it, so a shared buffer accumulates them into
//! batches and ships a whole batch per message. The channel is bounded, which
//! gives the walkers backpressure when the consumer falls behind.

use crate::geometry::{Segment2, Triangle3};
use crossbeam_channel::Sender;
use std::mem;
use std::sync::Mutex;

/// Batch size shipped per channel message.
pub(crate) const BATCH_SIZE: usize = 256;
/// Slack so a leaf cell's worth of primitives never forces a reallocation.
/// A marching cubes cell yields at most 5 triangles.
pub(crate) const BATCH_MARGIN: usize = 8;
/// Full batches that may queue before the walkers block.
pub(crate) const QUEUE_DEPTH: usize = 16;

/// A concurrency-safe triangle sink shared by the octree walkers.
pub struct TriangleBuffer {
    buf: Mutex<Vec<Triangle3>>,
    out: Sender<Vec<Triangle3>>,
}

impl TriangleBuffer {
    pub fn new(out: Sender<Vec<Triangle3>>) -> Self {
        Self {
            buf: Mutex::new(Vec::with_capacity(BATCH_SIZE + BATCH_MARGIN)),
            out,
        }
    }

    /// Append triangles, shipping the batch when it fills. If the consumer
    /// has gone away the batch is dropped and the walk runs to completion.
    pub fn write(&self, triangles: &[Triangle3]) {
        let mut buf = self.buf.lock().expect("triangle buffer poisoned");
        buf.extend_from_slice(triangles);
        if buf.len() >= BATCH_SIZE {
            let full = mem::replace(&mut *buf, Vec::with_capacity(BATCH_SIZE + BATCH_MARGIN));
            let _ = self.out.send(full);
        }
    }

    /// Flush the partial batch. Call once, after the walk has finished.
    pub fn close(&self) {
        let mut buf = self.buf.lock().expect("triangle buffer poisoned");
        if !buf.is_empty() {
            let rest = mem::take(&mut *buf);
            let _ = self.out.send(rest);
        }
    }
}

/// A concurrency-safe segment sink shared by the quadtree walkers.
pub struct SegmentBuffer {
    buf: Mutex<Vec<Segment2>>,
    out: Sender<Vec<Segment2>>,
}

impl SegmentBuffer {
    pub fn new(out: Sender<Vec<Segment2>>) -> Self {
        Self {
            buf: Mutex::new(Vec::with_capacity(BATCH_SIZE + BATCH_MARGIN)),
            out,
        }
    }

    pub fn write(&self, segments: &[Segment2]) {
        let mut buf = self.buf.lock().expect("segment buffer poisoned");
        buf.extend_from_slice(segments);
        if buf.len() >= BATCH_SIZE {
            let full = mem::replace(&mut *buf, Vec::with_capacity(BATCH_SIZE + BATCH_MARGIN));
            let _ = self.out.send(full);
        }
    }

    pub fn close(&self) {
        let mut buf = self.buf.lock().expect("segment buffer poisoned");
        if !buf.is_empty() {
            let rest = mem::take(&mut *buf);
            let _ = self.out.send(rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn tri(i: usize) -> Triangle3 {
        let x = i as crate::float_types::Real;
        Triangle3::new(
            Point3::new(x, 0.0, 0.0),
            Point3::new(x + 1.0, 0.0, 0.0),
            Point3::new(x, 1.0, 0.0),
        )
    }

    #[test]
    fn batches_flush_on_capacity() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let buf = TriangleBuffer::new(tx);
        let tris: Vec<Triangle3> = (0..BATCH_SIZE).map(tri).collect();
        buf.write(&tris);
        let batch = rx.try_recv().expect("full batch shipped");
        assert_eq!(batch.len(), BATCH_SIZE);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn close_flushes_remainder() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let buf = TriangleBuffer::new(tx);
        buf.write(&[tri(0), tri(1), tri(2)]);
        assert!(rx.try_recv().is_err());
        buf.close();
        assert_eq!(rx.try_recv().expect("remainder shipped").len(), 3);
    }

    #[test]
    fn close_with_empty_buffer_sends_nothing() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let buf = TriangleBuffer::new(tx);
        buf.close();
        assert!(rx.try_recv().is_err());
    }
}
