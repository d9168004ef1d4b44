//! Shape-key deformation
//!
//! Computes per-vertex displacement fields over a base mesh for a library of
//! named poses (compress, expand, curl, localized squeeze). The fields are
//! registered by a host as morph targets; the animation state machine blends
//! their weights at runtime.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mesh::MeshBuffer;

/// Maximum additional radial contraction at a squeeze center
const SQUEEZE_DEPTH: f32 = 0.3;

/// Volume-compensation bulge per unit of lost diameter (tuned constant)
const VOLUME_BULGE: f32 = 0.3;

/// Curl radius per unit of progress, as a fraction of the axis length
const CURL_RADIUS: f32 = 0.2;

/// Parameters for one displacement field
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeformationParams {
    /// Radial scale; 1.0 leaves girth unchanged
    pub diameter_scale: f32,
    /// Axial scale; 1.0 leaves length unchanged
    pub length_scale: f32,
    /// Center of an additional localized contraction, normalized position
    pub squeeze_position: Option<f32>,
    /// Gaussian width of the localized contraction
    pub squeeze_width: f32,
    /// Total curl of the distal portion in degrees
    pub curl_angle_degrees: f32,
    /// Normalized position where curling begins
    pub curl_start: f32,
    /// 0..=1, how strongly compression is compensated by a radial bulge
    pub volume_preservation: f32,
}

impl Default for DeformationParams {
    fn default() -> Self {
        Self {
            diameter_scale: 1.0,
            length_scale: 1.0,
            squeeze_position: None,
            squeeze_width: 0.15,
            curl_angle_degrees: 0.0,
            curl_start: 0.5,
            volume_preservation: 0.0,
        }
    }
}

/// Named shape-key poses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKeyPreset {
    /// Reference pose, zero displacement
    Base,
    /// Diameter compressed to 50%
    Compress50,
    /// Diameter compressed to 75%
    Compress75,
    /// Diameter expanded to 125%
    Expand125,
    /// Distal hook curl
    CurlTip,
    /// Curl over nearly the whole length
    CurlFull,
    SqueezeTip,
    SqueezeMid,
    SqueezeBase,
    /// Narrow squeeze band at mid-length
    SqueezeLocal,
}

impl ShapeKeyPreset {
    /// Every preset, reference pose included
    pub const ALL: [Self; 10] = [
        Self::Base,
        Self::Compress50,
        Self::Compress75,
        Self::Expand125,
        Self::CurlTip,
        Self::CurlFull,
        Self::SqueezeTip,
        Self::SqueezeMid,
        Self::SqueezeBase,
        Self::SqueezeLocal,
    ];

    /// Stable name, used as the morph-target key on the host side
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Compress50 => "compress_50",
            Self::Compress75 => "compress_75",
            Self::Expand125 => "expand_125",
            Self::CurlTip => "curl_tip",
            Self::CurlFull => "curl_full",
            Self::SqueezeTip => "squeeze_tip",
            Self::SqueezeMid => "squeeze_mid",
            Self::SqueezeBase => "squeeze_base",
            Self::SqueezeLocal => "squeeze_local",
        }
    }

    /// Deformation parameters for this pose
    ///
    /// Compress/expand names refer to the resulting diameter percentage.
    pub fn params(&self) -> DeformationParams {
        let base = DeformationParams::default();
        match self {
            Self::Base => base,
            Self::Compress50 => DeformationParams {
                diameter_scale: 0.5,
                volume_preservation: 0.5,
                ..base
            },
            Self::Compress75 => DeformationParams {
                diameter_scale: 0.75,
                volume_preservation: 0.5,
                ..base
            },
            Self::Expand125 => DeformationParams {
                diameter_scale: 1.25,
                ..base
            },
            Self::CurlTip => DeformationParams {
                curl_angle_degrees: 180.0,
                curl_start: 0.6,
                ..base
            },
            Self::CurlFull => DeformationParams {
                curl_angle_degrees: 270.0,
                curl_start: 0.1,
                ..base
            },
            Self::SqueezeTip => DeformationParams {
                squeeze_position: Some(0.8),
                squeeze_width: 0.15,
                ..base
            },
            Self::SqueezeMid => DeformationParams {
                squeeze_position: Some(0.5),
                squeeze_width: 0.2,
                ..base
            },
            Self::SqueezeBase => DeformationParams {
                squeeze_position: Some(0.15),
                squeeze_width: 0.2,
                ..base
            },
            Self::SqueezeLocal => DeformationParams {
                squeeze_position: Some(0.5),
                squeeze_width: 0.08,
                ..base
            },
        }
    }
}

/// Base-to-tip axis the deformer projects against
#[derive(Clone, Copy, Debug)]
pub struct TentacleAxis {
    pub base: Vec3,
    pub tip: Vec3,
}

impl TentacleAxis {
    /// Estimate the axis from end-slab centroids of a mesh
    ///
    /// Vertices within 5% of the axial extent of either end contribute to
    /// that end's centroid.
    pub fn estimate(mesh: &MeshBuffer) -> Self {
        let (min, max) = mesh.bounds();
        let extent = (max.z - min.z).max(f32::EPSILON);
        let slab = extent * 0.05;

        let mut base = Vec3::ZERO;
        let mut tip = Vec3::ZERO;
        let mut base_n = 0u32;
        let mut tip_n = 0u32;
        for p in &mesh.positions {
            let v = Vec3::from(*p);
            if v.z <= min.z + slab {
                base += v;
                base_n += 1;
            }
            if v.z >= max.z - slab {
                tip += v;
                tip_n += 1;
            }
        }
        Self {
            base: base / base_n.max(1) as f32,
            tip: tip / tip_n.max(1) as f32,
        }
    }

    /// Build from explicit base/tip reference point clouds
    pub fn from_point_clouds(base_points: &[Vec3], tip_points: &[Vec3]) -> Self {
        let centroid = |points: &[Vec3]| {
            points.iter().copied().sum::<Vec3>() / points.len().max(1) as f32
        };
        Self {
            base: centroid(base_points),
            tip: centroid(tip_points),
        }
    }

    fn direction(&self) -> Vec3 {
        (self.tip - self.base).normalize_or(Vec3::Z)
    }

    fn length(&self) -> f32 {
        (self.tip - self.base).length().max(f32::EPSILON)
    }
}

/// Summary statistics of a computed displacement field
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeKeyStats {
    /// Largest displacement magnitude across all vertices
    pub max_displacement: f32,
    /// Approximate volume change in percent (bounding-box estimate)
    pub volume_change_pct: f32,
}

/// A computed displacement field with its statistics
#[derive(Clone, Debug)]
pub struct ShapeKey {
    /// Morph-target name
    pub name: String,
    /// Per-vertex displacement, same order as the base mesh vertices
    pub offsets: Vec<[f32; 3]>,
    pub stats: ShapeKeyStats,
}

/// Compute the displacement field for one set of parameters
pub fn compute_shape_key(
    mesh: &MeshBuffer,
    axis: &TentacleAxis,
    name: &str,
    params: &DeformationParams,
) -> ShapeKey {
    let dir = axis.direction();
    let axis_len = axis.length();
    let (u, w) = dir.any_orthonormal_pair();
    let curl_rad = params.curl_angle_degrees.to_radians();

    let mut offsets = Vec::with_capacity(mesh.positions.len());
    let mut max_displacement = 0.0f32;
    let mut displaced_min = Vec3::splat(f32::MAX);
    let mut displaced_max = Vec3::splat(f32::MIN);

    for p in &mesh.positions {
        let v = Vec3::from(*p);
        let rel = v - axis.base;
        let axial = rel.dot(dir);
        let t = (axial / axis_len).clamp(0.0, 1.0);
        let radial = rel - dir * axial;

        // Radial terms compose multiplicatively
        let mut radial_scale = params.diameter_scale;
        if let Some(center) = params.squeeze_position {
            let d = t - center;
            let falloff = (-d * d / (2.0 * params.squeeze_width * params.squeeze_width)).exp();
            radial_scale *= 1.0 - SQUEEZE_DEPTH * falloff;
        }
        if params.volume_preservation > 0.0 && params.diameter_scale < 1.0 {
            // Without this bulge a compressed mesh visibly deflates
            radial_scale *=
                1.0 + (1.0 - params.diameter_scale) * params.volume_preservation * VOLUME_BULGE;
        }

        let mut offset = radial * (radial_scale - 1.0);

        // Spiral curl of the distal portion
        if curl_rad != 0.0 && t >= params.curl_start {
            let progress = (t - params.curl_start) / (1.0 - params.curl_start).max(f32::EPSILON);
            let angle = curl_rad * progress;
            let curl_radius = progress * axis_len * CURL_RADIUS;
            offset += (u * angle.sin() + w * (1.0 - angle.cos())) * curl_radius;
        }

        // Axial stretch grows from the base toward the tip
        offset += dir * ((params.length_scale - 1.0) * t * axis_len);

        let displacement = offset.length();
        if displacement > max_displacement {
            max_displacement = displacement;
        }
        let displaced = v + offset;
        displaced_min = displaced_min.min(displaced);
        displaced_max = displaced_max.max(displaced);
        offsets.push([offset.x, offset.y, offset.z]);
    }

    let (base_min, base_max) = mesh.bounds();
    let volume = |min: Vec3, max: Vec3| {
        let d = max - min;
        (d.x * d.y * d.z).abs()
    };
    let base_volume = volume(base_min, base_max);
    let volume_change_pct = if mesh.positions.is_empty() || base_volume <= f32::EPSILON {
        0.0
    } else {
        (volume(displaced_min, displaced_max) / base_volume - 1.0) * 100.0
    };

    debug!(name, max_displacement, volume_change_pct, "computed shape key");
    ShapeKey {
        name: name.to_string(),
        offsets,
        stats: ShapeKeyStats {
            max_displacement,
            volume_change_pct,
        },
    }
}

/// Compute every preset's displacement field except the reference pose
pub fn generate_shape_keys(mesh: &MeshBuffer, axis: &TentacleAxis) -> Vec<ShapeKey> {
    ShapeKeyPreset::ALL
        .iter()
        .filter(|preset| **preset != ShapeKeyPreset::Base)
        .map(|preset| compute_shape_key(mesh, axis, preset.name(), &preset.params()))
        .collect()
}
