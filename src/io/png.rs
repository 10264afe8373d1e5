//! PNG raster of a 2d distance field.
//!
//! Each pixel samples the field and maps the distance to a gray ramp. The
//! surface is pinned to mid-gray so a lopsided distance range on either side
//! cannot visually displace the contour: outside maps to (0.5, 1], inside
//! to [0, 0.5).

use crate::Sdf2;
use crate::errors::RenderError;
use crate::float_types::Real;
use image::GrayImage;
use nalgebra::Point2;
use std::path::Path;

/// Sample a 2d field over its bounding box and save it as a grayscale PNG
/// of `width` x `height` pixels.
pub fn to_png(
    sdf: &dyn Sdf2,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    log::info!("rendering {} ({}x{} px)", path.display(), width, height);
    let bb = sdf.bounding_box();
    let size = bb.size();
    let sample = |px: u32, py: u32| -> Real {
        // pixel centers, image y runs downwards
        let fx = (px as Real + 0.5) / width as Real;
        let fy = 1.0 - (py as Real + 0.5) / height as Real;
        sdf.evaluate(&Point2::new(bb.min.x + fx * size.x, bb.min.y + fy * size.y))
    };
    // first pass for the distance range
    let mut dmin: Real = 0.0;
    let mut dmax: Real = 0.0;
    for py in 0..height {
        for px in 0..width {
            let d = sample(px, py);
            dmin = dmin.min(d);
            dmax = dmax.max(d);
        }
    }
    let mut img = GrayImage::new(width, height);
    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let d = sample(px, py);
        *pixel = image::Luma([(255.0 * ramp(d, dmin, dmax)) as u8]);
    }
    img.save(path)?;
    Ok(())
}

/// Map a distance to [0, 1] with the surface pinned at 0.5.
fn ramp(dist: Real, dmin: Real, dmax: Real) -> Real {
    if dist >= 0.0 {
        if dmax <= 0.0 {
            return 0.5;
        }
        (0.5 + 0.5 * (dist / dmax)).clamp(0.5, 1.0)
    } else {
        if dmin >= 0.0 {
            return 0.5;
        }
        (0.5 * ((dist - dmin) / -dmin)).clamp(0.0, 0.5)
    }
}
