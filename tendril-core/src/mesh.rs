//! Mesh buffer types
//!
//! Plain numeric mesh data shared by every stage of the pipeline: full
//! precision f32 positions/normals and quad faces with u16 indices. Hosts
//! that need triangles call [`MeshBuffer::triangle_indices`].

use glam::Vec3;
use std::collections::HashMap;

/// Generated mesh data (quad faces, f32 vertices)
///
/// Vertex insertion order is generation order and is significant for face
/// indexing; whichever component last mutated the buffer owns it exclusively.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions as [x, y, z]
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z]
    pub normals: Vec<[f32; 3]>,
    /// Quad faces as 4 vertex indices in consistent outward winding
    pub quads: Vec<[u16; 4]>,
}

impl MeshBuffer {
    /// Create an empty mesh buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.positions.len() as u16;
        self.positions.push([position.x, position.y, position.z]);
        self.normals.push([normal.x, normal.y, normal.z]);
        index
    }

    /// Add a quad face (4 vertex indices, outward winding)
    pub fn add_quad(&mut self, i0: u16, i1: u16, i2: u16, i3: u16) {
        self.quads.push([i0, i1, i2, i3]);
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get quad count
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Get triangle count (each quad splits into two triangles)
    pub fn triangle_count(&self) -> usize {
        self.quads.len() * 2
    }

    /// Split each quad into two triangles, preserving winding
    pub fn triangle_indices(&self) -> Vec<u16> {
        let mut indices = Vec::with_capacity(self.quads.len() * 6);
        for &[i0, i1, i2, i3] in &self.quads {
            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i0, i2, i3]);
        }
        indices
    }

    /// Axis-aligned bounding box as (min, max)
    ///
    /// Returns zero extents for an empty buffer.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in &self.positions {
            let v = Vec3::from(*p);
            min = min.min(v);
            max = max.max(v);
        }
        if self.positions.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }
        (min, max)
    }

    /// Subdivide each quad into 4 quads using edge midpoints and a face center
    ///
    /// Midpoint vertices on shared edges are deduplicated so neighboring quads
    /// stay welded. Quad count grows 4x per iteration.
    pub fn subdivide(&mut self, iterations: u32) {
        for _ in 0..iterations {
            self.subdivide_once();
        }
    }

    fn subdivide_once(&mut self) {
        // Edge key: sorted pair of vertex indices
        type EdgeKey = (u16, u16);
        fn make_edge_key(a: u16, b: u16) -> EdgeKey {
            if a < b { (a, b) } else { (b, a) }
        }

        let mut edge_midpoints: HashMap<EdgeKey, u16> = HashMap::new();
        let mut new_quads = Vec::with_capacity(self.quads.len() * 4);
        let quads = std::mem::take(&mut self.quads);

        let mut midpoint = |mesh: &mut Self, a: u16, b: u16| -> u16 {
            let key = make_edge_key(a, b);
            if let Some(&idx) = edge_midpoints.get(&key) {
                return idx;
            }
            let p = (Vec3::from(mesh.positions[a as usize])
                + Vec3::from(mesh.positions[b as usize]))
                * 0.5;
            let n = (Vec3::from(mesh.normals[a as usize]) + Vec3::from(mesh.normals[b as usize]))
                .normalize_or_zero();
            let idx = mesh.add_vertex(p, n);
            edge_midpoints.insert(key, idx);
            idx
        };

        for [i0, i1, i2, i3] in quads {
            let m01 = midpoint(self, i0, i1);
            let m12 = midpoint(self, i1, i2);
            let m23 = midpoint(self, i2, i3);
            let m30 = midpoint(self, i3, i0);

            // Face center: average of the four corners
            let center_pos = (Vec3::from(self.positions[i0 as usize])
                + Vec3::from(self.positions[i1 as usize])
                + Vec3::from(self.positions[i2 as usize])
                + Vec3::from(self.positions[i3 as usize]))
                * 0.25;
            let center_norm = (Vec3::from(self.normals[i0 as usize])
                + Vec3::from(self.normals[i1 as usize])
                + Vec3::from(self.normals[i2 as usize])
                + Vec3::from(self.normals[i3 as usize]))
            .normalize_or_zero();
            let c = self.add_vertex(center_pos, center_norm);

            // Four child quads, same winding as the parent
            new_quads.push([i0, m01, c, m30]);
            new_quads.push([m01, i1, m12, c]);
            new_quads.push([c, m12, i2, m23]);
            new_quads.push([m30, c, m23, i3]);
        }

        self.quads = new_quads;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        let n = Vec3::Z;
        let a = mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0), n);
        let b = mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0), n);
        let c = mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0), n);
        let d = mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0), n);
        mesh.add_quad(a, b, c, d);
        mesh
    }

    #[test]
    fn test_triangle_indices_preserve_winding() {
        let mesh = unit_quad();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangle_indices(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_subdivide_quadruples_quads() {
        let mut mesh = unit_quad();
        mesh.subdivide(1);
        assert_eq!(mesh.quad_count(), 4);
        // 4 corners + 4 edge midpoints + 1 center
        assert_eq!(mesh.vertex_count(), 9);

        mesh.subdivide(1);
        assert_eq!(mesh.quad_count(), 16);
    }

    #[test]
    fn test_subdivide_preserves_bounds() {
        let mut mesh = unit_quad();
        let before = mesh.bounds();
        mesh.subdivide(2);
        let after = mesh.bounds();
        assert!((before.0 - after.0).length() < 1e-6);
        assert!((before.1 - after.1).length() < 1e-6);
    }

    #[test]
    fn test_subdivide_valid_indices() {
        let mut mesh = unit_quad();
        mesh.subdivide(2);
        for quad in &mesh.quads {
            for &idx in quad {
                assert!((idx as usize) < mesh.vertex_count());
            }
        }
    }

    #[test]
    fn test_empty_bounds() {
        let mesh = MeshBuffer::new();
        assert_eq!(mesh.bounds(), (Vec3::ZERO, Vec3::ZERO));
    }
}
