//! Animation states, target weights, and the legal transition graph

use serde::{Deserialize, Serialize};

use crate::deform::ShapeKeyPreset;

/// Behavioral states of one tentacle instance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Fully withdrawn, the rest state
    #[default]
    Hidden,
    /// Unfurling out of the hidden pose
    Emerging,
    /// Idle probing, loops until interrupted
    Searching,
    /// Wrapped around a target
    Grabbing,
    /// Fast strike
    Attacking,
    /// Withdrawing back toward hidden
    Retracting,
}

/// Idle-motion tag a host may layer on top of the blended weights
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleMotion {
    Sway,
    Pulse,
}

impl AnimationState {
    /// Shape-key weights this state settles into
    pub fn target_weights(&self) -> &'static [(ShapeKeyPreset, f32)] {
        match self {
            Self::Hidden => &[(ShapeKeyPreset::Compress50, 1.0)],
            Self::Emerging => &[],
            Self::Searching => &[(ShapeKeyPreset::CurlTip, 0.4)],
            Self::Grabbing => &[
                (ShapeKeyPreset::CurlFull, 1.0),
                (ShapeKeyPreset::SqueezeMid, 0.5),
            ],
            Self::Attacking => &[
                (ShapeKeyPreset::CurlTip, 0.8),
                (ShapeKeyPreset::Expand125, 0.6),
            ],
            Self::Retracting => &[
                (ShapeKeyPreset::Compress50, 1.0),
                (ShapeKeyPreset::SqueezeBase, 0.6),
            ],
        }
    }

    /// Whether the state's motion loops until an external transition
    pub fn loops(&self) -> bool {
        matches!(self, Self::Hidden | Self::Searching)
    }

    /// Optional idle-motion layer for the host
    pub fn idle_motion(&self) -> Option<IdleMotion> {
        match self {
            Self::Searching => Some(IdleMotion::Sway),
            Self::Grabbing => Some(IdleMotion::Pulse),
            _ => None,
        }
    }
}

/// Cross-fade easing applied to transition progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendCurve {
    #[default]
    Linear,
    Smooth,
    EaseIn,
    EaseOut,
}

impl BlendCurve {
    /// Map raw progress in [0, 1] through the curve
    pub fn apply(&self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::Smooth => p * p * (3.0 - 2.0 * p),
            Self::EaseIn => p * p,
            Self::EaseOut => 1.0 - (1.0 - p) * (1.0 - p),
        }
    }
}

/// One legal edge of the transition graph
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    pub from: AnimationState,
    pub to: AnimationState,
    /// Cross-fade duration in seconds (0 = immediate)
    pub duration: f32,
    pub curve: BlendCurve,
    /// Transient weight accents layered on during the cross-fade only
    pub overrides: &'static [(ShapeKeyPreset, f32)],
}

/// The legal transition graph; edges absent from this table are rejected
const TRANSITIONS: &[Transition] = &[
    Transition {
        from: AnimationState::Hidden,
        to: AnimationState::Emerging,
        duration: 1.2,
        curve: BlendCurve::EaseOut,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Emerging,
        to: AnimationState::Searching,
        duration: 0.8,
        curve: BlendCurve::Smooth,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Emerging,
        to: AnimationState::Retracting,
        duration: 0.5,
        curve: BlendCurve::EaseIn,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Searching,
        to: AnimationState::Grabbing,
        duration: 0.4,
        curve: BlendCurve::EaseOut,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Searching,
        to: AnimationState::Attacking,
        duration: 0.25,
        curve: BlendCurve::EaseIn,
        overrides: &[(ShapeKeyPreset::Expand125, 0.3)],
    },
    Transition {
        from: AnimationState::Searching,
        to: AnimationState::Retracting,
        duration: 0.6,
        curve: BlendCurve::Smooth,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Grabbing,
        to: AnimationState::Searching,
        duration: 0.7,
        curve: BlendCurve::Smooth,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Grabbing,
        to: AnimationState::Retracting,
        duration: 0.5,
        curve: BlendCurve::EaseIn,
        overrides: &[(ShapeKeyPreset::SqueezeLocal, 0.4)],
    },
    Transition {
        from: AnimationState::Attacking,
        to: AnimationState::Searching,
        duration: 0.6,
        curve: BlendCurve::Smooth,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Attacking,
        to: AnimationState::Retracting,
        duration: 0.5,
        curve: BlendCurve::EaseIn,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Retracting,
        to: AnimationState::Hidden,
        duration: 0.8,
        curve: BlendCurve::EaseOut,
        overrides: &[],
    },
    Transition {
        from: AnimationState::Retracting,
        to: AnimationState::Emerging,
        duration: 0.6,
        curve: BlendCurve::EaseOut,
        overrides: &[],
    },
];

/// Look up the edge between two states, if it is legal
pub fn transition(from: AnimationState, to: AnimationState) -> Option<&'static Transition> {
    TRANSITIONS.iter().find(|t| t.from == from && t.to == to)
}
