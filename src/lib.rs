//! Procedural solid modeling with **signed distance fields (SDF)**: build 2D/3D
//! shapes as implicit distance functions, combine them with boolean and blended
//! CSG operations, and extract polygon meshes / line sets with adaptive
//! octree/quadtree subdivision.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//! - **svg-io**: `.svg` export of 2D line sets
//! - [**dxf-io**](https://en.wikipedia.org/wiki/AutoCAD_DXF): `.dxf` export of 2D line sets
//! - **image-io**: `.png` raster of a 2D distance field
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to walk sibling octree cells concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod bounds;
pub mod geometry;
pub mod blends;
pub mod d2;
pub mod d3;
pub mod render;
pub mod io;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use bounds::{Bounds2, Bounds3};
pub use d2::Sdf2;
pub use d3::Sdf3;
pub use errors::{RenderError, ValidationError};
pub use geometry::{Segment2, Triangle3};
