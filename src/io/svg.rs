//! SVG output of 2d line sets.

use crate::Sdf2;
use crate::errors::RenderError;
use crate::geometry::Segment2;
use crate::render::{Render2, to_segments};
use svg::Document;
use svg::node::element::Line;
use std::path::Path;

/// Default stroke style for contour lines.
pub const LINE_STYLE: &str = "fill:none;stroke:black;stroke-width:0.1";

/// Render a 2d field with the given renderer and save the contour as SVG.
/// Returns the number of segments written.
pub fn to_svg(
    sdf: &dyn Sdf2,
    path: impl AsRef<Path>,
    renderer: &dyn Render2,
) -> Result<usize, RenderError> {
    let path = path.as_ref();
    log::info!("rendering {} ({})", path.display(), renderer.info(sdf));
    let segments = to_segments(sdf, renderer);
    write_svg(path, &segments, LINE_STYLE)?;
    Ok(segments.len())
}

/// Save a segment soup as an SVG document of line elements. SVG has y
/// growing downwards, so y is flipped about the extent of the data.
pub fn write_svg(
    path: impl AsRef<Path>,
    segments: &[Segment2],
    style: &str,
) -> Result<(), RenderError> {
    let (min, max) = extent(segments);
    let mut document = Document::new().set(
        "viewBox",
        (min.0, 0.0, max.0 - min.0, max.1 - min.1),
    );
    for s in segments {
        let [a, b] = s.0;
        let line = Line::new()
            .set("x1", a.x)
            .set("y1", max.1 - a.y)
            .set("x2", b.x)
            .set("y2", max.1 - b.y)
            .set("style", style);
        document = document.add(line);
    }
    svg::save(path, &document)?;
    Ok(())
}

fn extent(segments: &[Segment2]) -> ((f64, f64), (f64, f64)) {
    if segments.is_empty() {
        return ((0.0, 0.0), (0.0, 0.0));
    }
    let mut min = (f64::INFINITY, f64::INFINITY);
    let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for s in segments {
        for p in &s.0 {
            min.0 = min.0.min(p.x as f64);
            min.1 = min.1.min(p.y as f64);
            max.0 = max.0.max(p.x as f64);
            max.1 = max.1.max(p.y as f64);
        }
    }
    (min, max)
}
