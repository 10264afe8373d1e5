//! File output: mesh and vector formats fed from the extraction pipeline.
//!
//! Every writer is behind a cargo feature flag so the dependency only lands
//! when the format is wanted.

#[cfg(feature = "stl-io")]
pub mod stl;

#[cfg(feature = "dxf-io")]
pub mod dxf;

#[cfg(feature = "svg-io")]
pub mod svg;

#[cfg(feature = "image-io")]
pub mod png;

#[cfg(feature = "stl-io")]
pub use stl::{to_stl, write_stl};

#[cfg(feature = "dxf-io")]
pub use dxf::{to_dxf, write_dxf};

#[cfg(feature = "svg-io")]
pub use svg::{to_svg, write_svg};

#[cfg(feature = "image-io")]
pub use png::to_png;
