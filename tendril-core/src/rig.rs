//! Bone chain computation
//!
//! The portable half of rig generation: joint positions derived purely from
//! mesh geometry. Creating actual skeleton objects from these joints is a
//! host concern and lives outside the core.

use glam::Vec3;

use crate::mesh::MeshBuffer;

/// Joint positions for a single bone chain running base to tip
#[derive(Clone, Debug, PartialEq)]
pub struct BoneChain {
    /// Joint positions in chain order; bones connect consecutive joints
    pub joints: Vec<Vec3>,
}

impl BoneChain {
    /// Number of bones (one less than joints)
    pub fn bone_count(&self) -> usize {
        self.joints.len().saturating_sub(1)
    }

    /// Total chain length
    pub fn length(&self) -> f32 {
        self.joints
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).length())
            .sum()
    }
}

/// Compute a bone chain from mesh bounds
///
/// Splits the axial extent into `bone_count` even spans and places each
/// joint at the centroid of the vertices in its slab, so a bent or bulging
/// mesh yields a chain that follows the geometry instead of the bounding box
/// diagonal. Returns an empty chain for meshes with no vertices.
pub fn compute_bone_chain(mesh: &MeshBuffer, bone_count: usize) -> BoneChain {
    if mesh.positions.is_empty() || bone_count == 0 {
        return BoneChain { joints: Vec::new() };
    }

    let (min, max) = mesh.bounds();
    let extent = (max.z - min.z).max(f32::EPSILON);
    let joint_count = bone_count + 1;

    let mut sums = vec![Vec3::ZERO; joint_count];
    let mut counts = vec![0u32; joint_count];
    for p in &mesh.positions {
        let v = Vec3::from(*p);
        let t = ((v.z - min.z) / extent).clamp(0.0, 1.0);
        let slab = ((t * bone_count as f32).round() as usize).min(bone_count);
        sums[slab] += v;
        counts[slab] += 1;
    }

    let joints = (0..joint_count)
        .map(|i| {
            if counts[i] > 0 {
                sums[i] / counts[i] as f32
            } else {
                // Empty slab: fall back to the axis of the bounding box
                let t = i as f32 / bone_count as f32;
                Vec3::new(
                    (min.x + max.x) * 0.5,
                    (min.y + max.y) * 0.5,
                    min.z + extent * t,
                )
            }
        })
        .collect();

    BoneChain { joints }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{TentacleGenerator, TentacleSpec};

    #[test]
    fn test_chain_spans_the_body() {
        let mesh = TentacleGenerator::new(TentacleSpec::default())
            .unwrap()
            .generate();
        let chain = compute_bone_chain(&mesh, 6);
        assert_eq!(chain.bone_count(), 6);
        assert_eq!(chain.joints.len(), 7);

        // Joints run base to tip along the spine
        for pair in chain.joints.windows(2) {
            assert!(pair[1].z > pair[0].z);
        }
        assert!((chain.length() - 1.0).abs() < 0.1);

        // Ring centroids sit on the axis
        for joint in &chain.joints {
            assert!(joint.truncate().length() < 1e-3);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let mesh = MeshBuffer::new();
        assert_eq!(compute_bone_chain(&mesh, 4).joints.len(), 0);

        let mesh = TentacleGenerator::new(TentacleSpec::default())
            .unwrap()
            .generate();
        assert_eq!(compute_bone_chain(&mesh, 0).joints.len(), 0);
    }
}
