//! OBJ export for mesh buffers
//!
//! Wavefront OBJ keeps quads as quads, which preserves the generator's edge
//! flow for inspection in any DCC tool.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tendril_core::MeshBuffer;

/// Write a mesh buffer to an OBJ file with the given object name
pub fn write_obj(mesh: &MeshBuffer, path: &Path, name: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "o {name}")?;
    for [x, y, z] in &mesh.positions {
        writeln!(out, "v {x} {y} {z}")?;
    }
    for [x, y, z] in &mesh.normals {
        writeln!(out, "vn {x} {y} {z}")?;
    }
    // OBJ indices are 1-based; position and normal arrays run in parallel
    for [a, b, c, d] in &mesh.quads {
        writeln!(
            out,
            "f {0}//{0} {1}//{1} {2}//{2} {3}//{3}",
            a + 1,
            b + 1,
            c + 1,
            d + 1
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_obj_records_match_buffer() {
        let mut mesh = MeshBuffer::new();
        let n = Vec3::Z;
        let a = mesh.add_vertex(Vec3::ZERO, n);
        let b = mesh.add_vertex(Vec3::X, n);
        let c = mesh.add_vertex(Vec3::ONE, n);
        let d = mesh.add_vertex(Vec3::Y, n);
        mesh.add_quad(a, b, c, d);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        write_obj(&mesh, &path, "quad").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("o quad"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert_eq!(
            text.lines().find(|l| l.starts_with("f ")),
            Some("f 1//1 2//2 3//3 4//4")
        );
    }
}
