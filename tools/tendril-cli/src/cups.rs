//! Sucker cup realization
//!
//! Turns placement instances into renderable cup geometry: an outer wall, a
//! rim, and an inner cavity, oriented along each instance's outward normal.
//! This is the mesh-builder consumer of the core's placement engine.

use tendril_core::{MeshBuffer, SuckerInstance, SuckerSpec};

/// Vertices per cup ring
const CUP_SEGMENTS: usize = 8;

/// Build one merged mesh for a batch of sucker instances
pub fn realize_suckers(instances: &[SuckerInstance], spec: &SuckerSpec) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();
    for instance in instances {
        add_cup(&mut mesh, instance, spec);
    }
    mesh
}

/// Append one cup: four rings bridged by quad bands
///
/// Ring profile from the surface outward: attachment ring, outer rim, inner
/// rim (inset by rim_width), cavity floor (sunk by cup_depth). Higher
/// rim_sharpness keeps the inner rim closer to the outer rim's height.
fn add_cup(mesh: &mut MeshBuffer, instance: &SuckerInstance, spec: &SuckerSpec) {
    let axis = instance.normal;
    let (u, v) = axis.any_orthonormal_pair();
    let radius = instance.size * 0.5;
    let height = instance.size * 0.3;

    let rim_drop = height * 0.3 / spec.rim_sharpness.max(1.0);
    let rings = [
        // (ring radius, offset along the normal)
        (radius, 0.0),
        (radius, height),
        (radius * (1.0 - spec.rim_width), height - rim_drop),
        (radius * 0.25, height - spec.cup_depth * instance.size),
    ];

    let mut ring_starts = [0u16; 4];
    for (ring_index, &(ring_radius, offset)) in rings.iter().enumerate() {
        ring_starts[ring_index] = mesh.vertex_count() as u16;
        let center = instance.position + axis * offset;
        for s in 0..CUP_SEGMENTS {
            let theta = s as f32 / CUP_SEGMENTS as f32 * std::f32::consts::TAU;
            let radial = u * theta.cos() + v * theta.sin();
            let position = center + radial * ring_radius;
            // Outer wall points outward, cavity walls point back up the axis
            let normal = if ring_index < 2 {
                radial
            } else {
                (axis - radial).normalize_or(axis)
            };
            mesh.add_vertex(position, normal);
        }
    }

    for band in 0..rings.len() - 1 {
        let lower = ring_starts[band];
        let upper = ring_starts[band + 1];
        for s in 0..CUP_SEGMENTS as u16 {
            let next = (s + 1) % CUP_SEGMENTS as u16;
            mesh.add_quad(lower + s, upper + s, upper + next, lower + next);
        }
    }
}
