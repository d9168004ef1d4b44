//! Tentacle body generation
//!
//! Revolves a tapered profile around a straight spine to produce a quad-faced
//! tube: `segments + 1` rings of `resolution` vertices, with per-station
//! radius from the taper profile and linearly accumulating twist.
//!
//! Generation is a pure function of the spec: the same spec (seed included)
//! produces bit-identical vertex data, which is what makes caching and
//! regression testing possible downstream.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::debug;

use crate::error::ConfigError;
use crate::mesh::MeshBuffer;
use crate::profile::{TaperKind, TaperProfile};
use crate::segments::SegmentDistribution;

/// Full description of one tentacle body
///
/// Immutable value object: construct it, validate it through
/// [`TentacleGenerator::new`], and hand it to generation once.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TentacleSpec {
    /// Instance name, used for host-side object naming
    pub name: String,
    /// Overall length in scene units, 0.1..=3.0
    pub length: f32,
    /// Radius at the base, > tip_radius
    pub base_radius: f32,
    /// Radius at the tip, > 0
    pub tip_radius: f32,
    /// Number of lengthwise segments, 10..=50
    pub segments: u32,
    /// Vertices per ring, 16..=128
    pub resolution: u32,
    /// Taper curve family
    pub taper: TaperKind,
    /// Control points for [`TaperKind::Custom`]
    pub taper_points: Vec<(f32, f32)>,
    /// Total twist in degrees, accumulated linearly base to tip
    pub twist_degrees: f32,
    /// Quad subdivision iterations applied after the sweep, 0..=2
    pub subdivision: u32,
    /// Lengthwise station jitter, 0.0..=0.2 (0 = uniform stations)
    pub segment_variation: f32,
    /// Seed for every stochastic part of this instance
    pub seed: u64,
}

impl Default for TentacleSpec {
    fn default() -> Self {
        Self {
            name: "tentacle".into(),
            length: 1.0,
            base_radius: 0.04,
            tip_radius: 0.01,
            segments: 20,
            resolution: 16,
            taper: TaperKind::Organic,
            taper_points: Vec::new(),
            twist_degrees: 0.0,
            subdivision: 0,
            segment_variation: 0.0,
            seed: 0,
        }
    }
}

impl TentacleSpec {
    /// Long thin tentacle with a gentle smooth taper
    pub fn slender(seed: u64) -> Self {
        Self {
            name: "slender".into(),
            length: 1.6,
            base_radius: 0.03,
            tip_radius: 0.006,
            segments: 32,
            resolution: 24,
            taper: TaperKind::Smooth,
            twist_degrees: 30.0,
            seed,
            ..Default::default()
        }
    }

    /// Short thick tentacle with a pronounced organic bulge
    pub fn stout(seed: u64) -> Self {
        Self {
            name: "stout".into(),
            length: 0.7,
            base_radius: 0.07,
            tip_radius: 0.015,
            segments: 16,
            resolution: 32,
            taper: TaperKind::Organic,
            segment_variation: 0.1,
            seed,
            ..Default::default()
        }
    }
}

/// Body mesh generator for one validated spec
pub struct TentacleGenerator {
    spec: TentacleSpec,
    profile: TaperProfile,
}

impl TentacleGenerator {
    /// Validate the spec and build its taper profile
    ///
    /// Every range check happens here, before any generation work; an invalid
    /// spec never produces a partial mesh.
    pub fn new(spec: TentacleSpec) -> Result<Self, ConfigError> {
        if !(0.1..=3.0).contains(&spec.length) {
            return Err(ConfigError::Length(spec.length));
        }
        if spec.base_radius <= 0.0 {
            return Err(ConfigError::BaseRadius(spec.base_radius));
        }
        if spec.tip_radius <= 0.0 || spec.tip_radius >= spec.base_radius {
            return Err(ConfigError::RadiusOrder {
                base: spec.base_radius,
                tip: spec.tip_radius,
            });
        }
        if !(10..=50).contains(&spec.segments) {
            return Err(ConfigError::Segments(spec.segments));
        }
        if !(16..=128).contains(&spec.resolution) {
            return Err(ConfigError::Resolution(spec.resolution));
        }
        if !(0.0..=0.2).contains(&spec.segment_variation) {
            return Err(ConfigError::Variation(spec.segment_variation));
        }
        if spec.subdivision > 2 {
            return Err(ConfigError::Subdivision(spec.subdivision));
        }

        // Subdividing a welded tube grid s times yields exactly
        // (segments * 2^s + 1) rings of (resolution * 2^s) vertices
        let scale = 1u32 << spec.subdivision;
        let final_vertices =
            (spec.segments as usize * scale as usize + 1) * (spec.resolution as usize * scale as usize);
        if final_vertices > u16::MAX as usize {
            return Err(ConfigError::VertexBudget(final_vertices));
        }

        let profile = match spec.taper {
            TaperKind::Custom => TaperProfile::from_points(&spec.taper_points)?,
            kind => TaperProfile::new(kind, spec.base_radius, spec.tip_radius)?,
        };

        Ok(Self { spec, profile })
    }

    /// The validated spec
    pub fn spec(&self) -> &TentacleSpec {
        &self.spec
    }

    /// Body radius at normalized position `t`, clamped to [0, 1]
    ///
    /// This is the radius function the sucker placement engine consumes.
    pub fn radius_at(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        // Clamped input is always in the profile's domain
        let factor = self.profile.radius_factor_at(t).unwrap_or(1.0);
        self.spec.base_radius * factor
    }

    /// Sweep the profile into a quad mesh
    pub fn generate(&self) -> MeshBuffer {
        let spec = &self.spec;
        let distribution = SegmentDistribution {
            count: spec.segments,
            uniform: spec.segment_variation == 0.0,
            variation: spec.segment_variation,
            seed: spec.seed,
        };
        // Variation range was validated in `new`
        let stations = distribution.positions(spec.length).unwrap_or_default();

        let resolution = spec.resolution as usize;
        let twist_total = spec.twist_degrees.to_radians();

        let mut mesh = MeshBuffer::new();
        let radii: Vec<f32> = stations
            .iter()
            .map(|&z| self.radius_at(z / spec.length))
            .collect();

        for (i, &z) in stations.iter().enumerate() {
            let t = z / spec.length;
            let radius = radii[i];

            // Radius slope for normal tilt, central-differenced where possible
            let (z0, z1, r0, r1) = match i {
                0 => (stations[0], stations[1], radii[0], radii[1]),
                i if i == stations.len() - 1 => {
                    (stations[i - 1], stations[i], radii[i - 1], radii[i])
                }
                i => (stations[i - 1], stations[i + 1], radii[i - 1], radii[i + 1]),
            };
            let slope = (r1 - r0) / (z1 - z0);

            // Twist accumulates linearly with position and never resets
            let twist = twist_total * t;

            for j in 0..resolution {
                let theta = twist + (j as f32 / resolution as f32) * TAU;
                let (sin_theta, cos_theta) = theta.sin_cos();

                let position = Vec3::new(radius * cos_theta, radius * sin_theta, z);
                let normal = Vec3::new(cos_theta, sin_theta, -slope).normalize();
                mesh.add_vertex(position, normal);
            }
        }

        // Quads between adjacent rings; CCW when viewed from outside
        for ring in 0..spec.segments as usize {
            for j in 0..resolution {
                let next_j = (j + 1) % resolution;
                let a = (ring * resolution + j) as u16;
                let b = ((ring + 1) * resolution + j) as u16;
                let c = ((ring + 1) * resolution + next_j) as u16;
                let d = (ring * resolution + next_j) as u16;
                mesh.add_quad(a, b, c, d);
            }
        }

        if spec.subdivision > 0 {
            mesh.subdivide(spec.subdivision);
        }

        debug!(
            name = %spec.name,
            vertices = mesh.vertex_count(),
            quads = mesh.quad_count(),
            "generated tentacle body"
        );
        mesh
    }
}
