//! Binary STL output.

use crate::errors::RenderError;
use crate::geometry::Triangle3;
use crate::render::{Render3, to_triangles};
use crate::Sdf3;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Render a 3d field with the given renderer and save the mesh as binary
/// STL. Returns the number of triangles written.
pub fn to_stl(
    sdf: &dyn Sdf3,
    path: impl AsRef<Path>,
    renderer: &dyn Render3,
) -> Result<usize, RenderError> {
    let path = path.as_ref();
    log::info!("rendering {} ({})", path.display(), renderer.info(sdf));
    let triangles = to_triangles(sdf, renderer);
    write_stl(path, &triangles)?;
    Ok(triangles.len())
}

/// Save a triangle soup as binary STL.
pub fn write_stl(path: impl AsRef<Path>, triangles: &[Triangle3]) -> Result<(), RenderError> {
    use stl_io::{Normal, Triangle, Vertex};

    let mesh: Vec<Triangle> = triangles
        .iter()
        .map(|t| {
            let n = t.normal();
            #[allow(clippy::unnecessary_cast)]
            Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: t.0.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            }
        })
        .collect();

    let mut file = BufWriter::new(File::create(path)?);
    stl_io::write_stl(&mut file, mesh.iter())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::d3::Sphere;
    use crate::render::MarchingCubesOctree;
    use std::io::Read;

    #[test]
    fn sphere_stl_has_valid_header() {
        let dir = std::env::temp_dir().join("sdfrs-stl-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sphere.stl");
        let s = Sphere::new(1.0).unwrap();
        let r = MarchingCubesOctree::new(8).unwrap();
        let count = to_stl(&s, &path, &r).unwrap();
        assert!(count > 0);
        // binary stl: 80 byte header then a little-endian u32 triangle count
        let mut buf = Vec::new();
        std::fs::File::open(&path).unwrap().read_to_end(&mut buf).unwrap();
        let n = u32::from_le_bytes(buf[80..84].try_into().unwrap()) as usize;
        assert_eq!(n, count);
        assert_eq!(buf.len(), 84 + 50 * n);
        std::fs::remove_file(&path).ok();
    }
}
