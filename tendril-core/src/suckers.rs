//! Sucker placement
//!
//! Lays out surface decorations in rows along the tentacle and columns around
//! its circumference. The engine only produces placement instances (position,
//! outward normal, size); realizing them as cup geometry is a consumer's job.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::debug;

use crate::error::ConfigError;

/// Row layout mode along the tentacle length
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuckerPattern {
    /// Evenly spaced rows, columns aligned
    Uniform,
    /// Evenly spaced rows, every other row rotated half a column step
    #[default]
    Alternating,
    /// Rows drawn uniformly at random, then sorted
    Random,
    /// Rows biased toward the base
    DenseBase,
}

/// Sucker layout parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SuckerSpec {
    /// Produce no instances at all when false
    pub enabled: bool,
    /// Rows along the length, 2..=8
    pub rows: u32,
    /// Columns around the circumference, 4..=12
    pub columns: u32,
    /// Sucker size at the base row, > tip_size
    pub base_size: f32,
    /// Sucker size at the tip row, > 0
    pub tip_size: f32,
    /// Per-instance size jitter fraction
    pub size_variation: f32,
    /// Cup cavity depth as a fraction of sucker size
    pub cup_depth: f32,
    /// Rim width as a fraction of sucker size
    pub rim_width: f32,
    /// Rim profile sharpness, higher is crisper
    pub rim_sharpness: f32,
    /// Row layout mode
    pub pattern: SuckerPattern,
    /// First row position along the length, normalized
    pub start_offset: f32,
    /// Last row position along the length, normalized
    pub end_offset: f32,
    /// Seed for row draws and size jitter
    pub seed: u64,
}

impl Default for SuckerSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            rows: 6,
            columns: 8,
            base_size: 0.012,
            tip_size: 0.004,
            size_variation: 0.15,
            cup_depth: 0.4,
            rim_width: 0.25,
            rim_sharpness: 2.0,
            pattern: SuckerPattern::Alternating,
            start_offset: 0.05,
            end_offset: 0.9,
            seed: 0,
        }
    }
}

impl SuckerSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=8).contains(&self.rows) {
            return Err(ConfigError::SuckerRows(self.rows));
        }
        if !(4..=12).contains(&self.columns) {
            return Err(ConfigError::SuckerColumns(self.columns));
        }
        if self.tip_size <= 0.0 || self.tip_size >= self.base_size {
            return Err(ConfigError::SuckerSizeOrder {
                base: self.base_size,
                tip: self.tip_size,
            });
        }
        if self.start_offset < 0.0 || self.end_offset > 1.0 || self.start_offset >= self.end_offset
        {
            return Err(ConfigError::SuckerOffsets {
                start: self.start_offset,
                end: self.end_offset,
            });
        }
        Ok(())
    }
}

/// One placed sucker
///
/// Produced in bulk by [`place_suckers`] and consumed immediately by a mesh
/// builder; instances are not retained across generation calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuckerInstance {
    /// World position on the tentacle surface
    pub position: Vec3,
    /// Outward radial unit normal (no local curvature correction)
    pub normal: Vec3,
    /// Sucker diameter in scene units
    pub size: f32,
    /// Row index along the length
    pub row: u32,
    /// Column index around the circumference
    pub column: u32,
}

/// Place suckers on a tentacle surface
///
/// `radius_at` is the body generator's radius function over normalized
/// position. A disabled spec yields an empty list, not an error.
pub fn place_suckers(
    spec: &SuckerSpec,
    tentacle_length: f32,
    radius_at: impl Fn(f32) -> f32,
) -> Result<Vec<SuckerInstance>, ConfigError> {
    if !spec.enabled {
        return Ok(Vec::new());
    }
    spec.validate()?;

    let mut rng = Pcg32::seed_from_u64(spec.seed);
    let rows = spec.rows as usize;
    let columns = spec.columns as usize;
    let span = spec.end_offset - spec.start_offset;

    let row_positions: Vec<f32> = match spec.pattern {
        SuckerPattern::Uniform | SuckerPattern::Alternating => (0..rows)
            .map(|i| spec.start_offset + span * i as f32 / (rows - 1) as f32)
            .collect(),
        SuckerPattern::Random => {
            let mut positions: Vec<f32> = (0..rows)
                .map(|_| spec.start_offset + span * rng.random_range(0.0..=1.0))
                .collect();
            positions.sort_by(f32::total_cmp);
            positions
        }
        SuckerPattern::DenseBase => (0..rows)
            .map(|i| {
                let t_norm = i as f32 / (rows - 1) as f32;
                spec.start_offset + span * t_norm.powf(1.5)
            })
            .collect(),
    };

    let mut instances = Vec::with_capacity(rows * columns);
    for (row, &row_t) in row_positions.iter().enumerate() {
        let radius = radius_at(row_t);
        let z = row_t * tentacle_length;

        // Half a column step on every other row breaks the grid up
        let angle_offset = if spec.pattern == SuckerPattern::Alternating && row % 2 == 1 {
            TAU / columns as f32 * 0.5
        } else {
            0.0
        };

        for column in 0..columns {
            let theta = angle_offset + column as f32 / columns as f32 * TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let jitter = 1.0 + rng.random_range(-spec.size_variation..=spec.size_variation);
            let size = lerp(spec.base_size, spec.tip_size, row_t) * jitter;

            instances.push(SuckerInstance {
                position: Vec3::new(radius * cos_theta, radius * sin_theta, z),
                normal: Vec3::new(cos_theta, sin_theta, 0.0),
                size,
                row: row as u32,
                column: column as u32,
            });
        }
    }

    debug!(count = instances.len(), pattern = ?spec.pattern, "placed suckers");
    Ok(instances)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
