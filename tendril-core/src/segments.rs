//! Segment distribution along the tentacle length
//!
//! Produces the z stations the body generator sweeps its rings through.
//! Uniform by default; optional seeded jitter keeps organic spacing without
//! ever degenerating a segment.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fraction of a segment's length reserved on each side when jittering, so
/// perturbed stations stay strictly between their uniform neighbors
const SAFETY_MARGIN: f32 = 0.1;

/// Station placement parameters
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SegmentDistribution {
    /// Number of segments (stations = count + 1)
    pub count: u32,
    /// Evenly spaced stations when true; `variation` is ignored
    pub uniform: bool,
    /// Jitter magnitude as a fraction of segment length, 0.0..=0.2
    pub variation: f32,
    /// Seed for deterministic jitter
    pub seed: u64,
}

impl Default for SegmentDistribution {
    fn default() -> Self {
        Self {
            count: 20,
            uniform: true,
            variation: 0.0,
            seed: 0,
        }
    }
}

impl SegmentDistribution {
    /// Ordered station positions spanning exactly [0, length]
    ///
    /// Returns `count + 1` strictly increasing values with first = 0 and
    /// last = length. Deterministic for a fixed seed.
    pub fn positions(&self, length: f32) -> Result<Vec<f32>, ConfigError> {
        if !(0.0..=0.2).contains(&self.variation) {
            return Err(ConfigError::Variation(self.variation));
        }

        let count = self.count as usize;
        let segment_length = length / self.count as f32;
        let mut stations: Vec<f32> = (0..=count).map(|i| i as f32 * segment_length).collect();
        stations[count] = length;

        if !self.uniform && self.variation > 0.0 {
            let mut rng = Pcg32::seed_from_u64(self.seed);
            for i in 1..count {
                let uniform_pos = i as f32 * segment_length;
                let offset = rng.random_range(-self.variation..=self.variation) * segment_length;
                // Clamp against the uniform-case neighbors, minus the margin,
                // so the sequence stays monotonic and non-degenerate
                let lo = (i as f32 - 1.0 + SAFETY_MARGIN) * segment_length;
                let hi = (i as f32 + 1.0 - SAFETY_MARGIN) * segment_length;
                stations[i] = (uniform_pos + offset).clamp(lo, hi);
            }
        }

        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_ten_segments() {
        let dist = SegmentDistribution {
            count: 10,
            ..Default::default()
        };
        let stations = dist.positions(1.0).unwrap();
        assert_eq!(stations.len(), 11);
        for (i, &z) in stations.iter().enumerate() {
            assert!((z - i as f32 * 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_jittered_spans_and_increases() {
        let dist = SegmentDistribution {
            count: 24,
            uniform: false,
            variation: 0.2,
            seed: 7,
        };
        let stations = dist.positions(2.5).unwrap();
        assert_eq!(stations[0], 0.0);
        assert_eq!(*stations.last().unwrap(), 2.5);
        for pair in stations.windows(2) {
            assert!(pair[1] > pair[0], "stations must be strictly increasing");
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let dist = SegmentDistribution {
            count: 16,
            uniform: false,
            variation: 0.15,
            seed: 42,
        };
        assert_eq!(dist.positions(1.0).unwrap(), dist.positions(1.0).unwrap());

        let other = SegmentDistribution { seed: 43, ..dist };
        assert_ne!(dist.positions(1.0).unwrap(), other.positions(1.0).unwrap());
    }

    #[test]
    fn test_variation_out_of_range() {
        let dist = SegmentDistribution {
            variation: 0.3,
            ..Default::default()
        };
        assert_eq!(dist.positions(1.0).unwrap_err(), ConfigError::Variation(0.3));
    }
}
