//! Level-of-detail summaries
//!
//! Produces reduced-count mesh summaries at fixed decimation ratios. The
//! core reports target counts only; a host with a real decimator may replace
//! the counts with measured ones, as long as they stay non-increasing and
//! never drop below the floor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::mesh::MeshBuffer;

/// No level may report fewer primitives than this
const COUNT_FLOOR: usize = 4;

/// One entry of a LOD chain
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LodLevel {
    pub name: String,
    /// Decimation ratio in (0, 1]; level 0 must use 1.0
    pub ratio: f32,
    /// Screen-size threshold at which the level becomes active
    pub screen_size: f32,
}

impl LodLevel {
    /// The standard 4-level chain
    pub fn default_chain() -> Vec<LodLevel> {
        [
            ("LOD0", 1.0, 1.0),
            ("LOD1", 0.5, 0.5),
            ("LOD2", 0.25, 0.25),
            ("LOD3", 0.1, 0.1),
        ]
        .into_iter()
        .map(|(name, ratio, screen_size)| LodLevel {
            name: name.to_string(),
            ratio,
            screen_size,
        })
        .collect()
    }
}

/// Resulting counts for one generated level
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LodResult {
    pub name: String,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub success: bool,
}

/// Produce one result per level of an ordered chain
///
/// Level 0 passes the source counts through unchanged; later levels report
/// `max(4, round(count * ratio))`, additionally clamped so counts never
/// increase from one level to the next.
pub fn generate_lods(mesh: &MeshBuffer, levels: &[LodLevel]) -> Result<Vec<LodResult>, ConfigError> {
    if levels.is_empty() {
        return Err(ConfigError::EmptyLodChain);
    }
    for level in levels {
        if !(level.ratio > 0.0 && level.ratio <= 1.0) {
            return Err(ConfigError::LodRatio(level.ratio));
        }
    }

    let source_vertices = mesh.vertex_count();
    let source_triangles = mesh.triangle_count();

    let mut results = Vec::with_capacity(levels.len());
    let mut prev_vertices = source_vertices;
    let mut prev_triangles = source_triangles;

    for (i, level) in levels.iter().enumerate() {
        let (vertex_count, triangle_count) = if i == 0 {
            (source_vertices, source_triangles)
        } else {
            let scaled = |count: usize| -> usize {
                ((count as f32 * level.ratio).round() as usize).max(COUNT_FLOOR)
            };
            (
                scaled(source_vertices).min(prev_vertices),
                scaled(source_triangles).min(prev_triangles),
            )
        };
        prev_vertices = vertex_count;
        prev_triangles = triangle_count;

        debug!(name = %level.name, vertex_count, triangle_count, "generated LOD level");
        results.push(LodResult {
            name: level.name.clone(),
            vertex_count,
            triangle_count,
            success: true,
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{TentacleGenerator, TentacleSpec};

    fn test_mesh() -> MeshBuffer {
        TentacleGenerator::new(TentacleSpec::default())
            .unwrap()
            .generate()
    }

    #[test]
    fn test_level_zero_passes_counts_through() {
        let mesh = test_mesh();
        let results = generate_lods(&mesh, &LodLevel::default_chain()).unwrap();
        assert_eq!(results[0].vertex_count, mesh.vertex_count());
        assert_eq!(results[0].triangle_count, mesh.triangle_count());
    }

    #[test]
    fn test_counts_non_increasing_and_floored() {
        let mesh = test_mesh();
        let results = generate_lods(&mesh, &LodLevel::default_chain()).unwrap();
        for pair in results.windows(2) {
            assert!(pair[1].vertex_count <= pair[0].vertex_count);
            assert!(pair[1].triangle_count <= pair[0].triangle_count);
        }
        for result in &results {
            assert!(result.vertex_count >= COUNT_FLOOR);
            assert!(result.triangle_count >= COUNT_FLOOR);
            assert!(result.success);
        }
    }

    #[test]
    fn test_tiny_mesh_hits_floor() {
        // Two-quad strip: 6 vertices, 4 triangles
        let mut mesh = MeshBuffer::new();
        let n = glam::Vec3::Z;
        for x in 0..3 {
            for y in 0..2 {
                mesh.add_vertex(glam::Vec3::new(x as f32, y as f32, 0.0), n);
            }
        }
        mesh.add_quad(0, 2, 3, 1);
        mesh.add_quad(2, 4, 5, 3);

        let results = generate_lods(&mesh, &LodLevel::default_chain()).unwrap();
        assert_eq!(results[3].vertex_count, COUNT_FLOOR);
        assert_eq!(results[3].triangle_count, COUNT_FLOOR);
    }

    #[test]
    fn test_rejects_bad_chains() {
        let mesh = test_mesh();
        assert_eq!(generate_lods(&mesh, &[]).unwrap_err(), ConfigError::EmptyLodChain);

        let bad = vec![LodLevel {
            name: "LOD0".into(),
            ratio: 1.5,
            screen_size: 1.0,
        }];
        assert_eq!(
            generate_lods(&mesh, &bad).unwrap_err(),
            ConfigError::LodRatio(1.5)
        );
    }
}
