//! DXF output of 2d line sets.

use crate::Sdf2;
use crate::errors::RenderError;
use crate::geometry::Segment2;
use crate::render::{Render2, to_segments};
use dxf::Drawing;
use dxf::entities::{Entity, EntityType, Line};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Render a 2d field with the given renderer and save the contour as DXF.
/// Returns the number of segments written.
pub fn to_dxf(
    sdf: &dyn Sdf2,
    path: impl AsRef<Path>,
    renderer: &dyn Render2,
) -> Result<usize, RenderError> {
    let path = path.as_ref();
    log::info!("rendering {} ({})", path.display(), renderer.info(sdf));
    let segments = to_segments(sdf, renderer);
    write_dxf(path, &segments)?;
    Ok(segments.len())
}

/// Save a segment soup as a DXF drawing of LINE entities.
pub fn write_dxf(path: impl AsRef<Path>, segments: &[Segment2]) -> Result<(), RenderError> {
    let mut drawing = Drawing::new();
    for s in segments {
        let [a, b] = s.0;
        let line = Line::new(
            dxf::Point::new(a.x as f64, a.y as f64, 0.0),
            dxf::Point::new(b.x as f64, b.y as f64, 0.0),
        );
        drawing.add_entity(Entity::new(EntityType::Line(line)));
    }
    let mut file = BufWriter::new(File::create(path)?);
    drawing.save(&mut file)?;
    Ok(())
}
