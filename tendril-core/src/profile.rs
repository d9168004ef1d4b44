//! Taper profile math
//!
//! Closed-form radius-at-position curves. A profile maps normalized position
//! `t` along the tentacle (0 = base, 1 = tip) to a factor that scales the
//! base radius, so `radius(t) = base_radius * radius_factor_at(t)`.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, DomainError};

/// Inflection point of the organic profile
const ORGANIC_MIDPOINT: f32 = 0.4;

/// Mid-bulge magnitude per unit of smoothness (empirically tuned, see
/// `TaperProfile::organic_smoothness`)
const ORGANIC_BULGE: f32 = 0.3;

/// Taper curve family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaperKind {
    /// Straight-line radius falloff from base to tip
    Linear,
    /// Linear falloff through a smoothstep ease (C1-continuous)
    Smooth,
    /// Bulbous base with rapid taper toward the tip
    #[default]
    Organic,
    /// Piecewise-linear interpolation over caller-supplied control points
    Custom,
}

/// Radius-scaling curve for a tentacle silhouette
///
/// Pure and total for `t` in [0, 1]; out-of-range input fails with
/// [`DomainError`] except for [`TaperKind::Custom`], which clamps to its
/// endpoint values.
#[derive(Clone, Debug)]
pub struct TaperProfile {
    kind: TaperKind,
    /// base_radius / tip_radius, > 1 for a narrowing tentacle
    base_ratio: f32,
    /// Organic bulge control in [0, 1]
    smoothness: f32,
    /// Control points sorted by position, only used by `Custom`
    points: Vec<(f32, f32)>,
}

impl TaperProfile {
    /// Create a profile for the given radii
    ///
    /// Fails if the radii are not ordered `0 < tip < base`. `Custom` profiles
    /// are built with [`TaperProfile::from_points`] instead.
    pub fn new(kind: TaperKind, base_radius: f32, tip_radius: f32) -> Result<Self, ConfigError> {
        if base_radius <= 0.0 {
            return Err(ConfigError::BaseRadius(base_radius));
        }
        if tip_radius <= 0.0 || tip_radius >= base_radius {
            return Err(ConfigError::RadiusOrder {
                base: base_radius,
                tip: tip_radius,
            });
        }
        Ok(Self {
            kind,
            base_ratio: base_radius / tip_radius,
            smoothness: 0.5,
            points: Vec::new(),
        })
    }

    /// Create a custom profile from (position, radius factor) control points
    ///
    /// Points are sorted by position before interpolation. Positions must lie
    /// in [0, 1] and factors in [0, 2].
    pub fn from_points(points: &[(f32, f32)]) -> Result<Self, ConfigError> {
        if points.is_empty() {
            return Err(ConfigError::EmptyControlPoints);
        }
        for &(position, factor) in points {
            if !(0.0..=1.0).contains(&position) || !(0.0..=2.0).contains(&factor) {
                return Err(ConfigError::ControlPoint { position, factor });
            }
        }
        let mut points = points.to_vec();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self {
            kind: TaperKind::Custom,
            base_ratio: 1.0,
            smoothness: 0.5,
            points,
        })
    }

    /// Set the organic bulge control (clamped to [0, 1])
    ///
    /// The mid bulge grows as `smoothness * 0.3`; the constant is a tuned
    /// visual magnitude, not structural.
    pub fn organic_smoothness(mut self, smoothness: f32) -> Self {
        self.smoothness = smoothness.clamp(0.0, 1.0);
        self
    }

    /// Curve family of this profile
    pub fn kind(&self) -> TaperKind {
        self.kind
    }

    /// Radius factor at normalized position `t` in [0, 1]
    pub fn radius_factor_at(&self, t: f32) -> Result<f32, DomainError> {
        if self.kind == TaperKind::Custom {
            // Custom profiles clamp instead of failing
            return Ok(self.interpolate_points(t.clamp(0.0, 1.0)));
        }
        if !(0.0..=1.0).contains(&t) {
            return Err(DomainError::unit(t));
        }

        let tip_factor = 1.0 / self.base_ratio;
        Ok(match self.kind {
            TaperKind::Linear => 1.0 - t * (1.0 - tip_factor),
            TaperKind::Smooth => {
                let eased = t * t * (3.0 - 2.0 * t);
                1.0 - eased * (1.0 - tip_factor)
            }
            TaperKind::Organic => {
                let bulge = 1.0 + self.smoothness * ORGANIC_BULGE;
                if t < ORGANIC_MIDPOINT {
                    // Smoothstep from the base radius out to the mid bulge
                    let s = t / ORGANIC_MIDPOINT;
                    let eased = s * s * (3.0 - 2.0 * s);
                    1.0 + eased * (bulge - 1.0)
                } else {
                    // Quadratic acceleration from the bulge down to the tip
                    let s = (t - ORGANIC_MIDPOINT) / (1.0 - ORGANIC_MIDPOINT);
                    bulge + (tip_factor - bulge) * s * s
                }
            }
            TaperKind::Custom => unreachable!(),
        })
    }

    fn interpolate_points(&self, t: f32) -> f32 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for pair in self.points.windows(2) {
            let (p0, f0) = pair[0];
            let (p1, f1) = pair[1];
            if t <= p1 {
                let span = p1 - p0;
                if span <= f32::EPSILON {
                    return f1;
                }
                let s = (t - p0) / span;
                return f0 + (f1 - f0) * s;
            }
        }
        last.1
    }
}
