//! Per-instance animation state machine
//!
//! Tracks one tentacle's current state and cross-fade bookkeeping. All
//! mutation goes through [`StateMachine::update`] and
//! [`StateMachine::transition_to`]; callers drive `update` once per frame
//! tick, serially per instance.

use std::collections::HashMap;
use std::f32::consts::PI;
use tracing::debug;

use super::states::{AnimationState, BlendCurve, transition};
use crate::deform::ShapeKeyPreset;

/// Blended shape-key weights, keyed by preset
pub type WeightMap = HashMap<ShapeKeyPreset, f32>;

/// Finite-state animation model for one tentacle
#[derive(Clone, Debug)]
pub struct StateMachine {
    current: AnimationState,
    previous: AnimationState,
    /// Time in the current state; negative means "scheduled but not started"
    state_time: f32,
    remaining_transition: f32,
    total_transition: f32,
    curve: BlendCurve,
    overrides: &'static [(ShapeKeyPreset, f32)],
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Start in [`AnimationState::Hidden`] with no transition running
    pub fn new() -> Self {
        Self {
            current: AnimationState::Hidden,
            previous: AnimationState::Hidden,
            state_time: 0.0,
            remaining_transition: 0.0,
            total_transition: 0.0,
            curve: BlendCurve::Linear,
            overrides: &[],
        }
    }

    pub fn current_state(&self) -> AnimationState {
        self.current
    }

    pub fn previous_state(&self) -> AnimationState {
        self.previous
    }

    /// Time spent in the current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// A cross-fade is running iff transition time remains
    pub fn is_transitioning(&self) -> bool {
        self.remaining_transition > 0.0
    }

    /// Whether the edge to `target` exists in the transition graph
    pub fn can_transition_to(&self, target: AnimationState) -> bool {
        transition(self.current, target).is_some()
    }

    /// Request a transition; returns false (and mutates nothing) for any
    /// edge absent from the graph
    pub fn transition_to(&mut self, target: AnimationState) -> bool {
        let Some(edge) = transition(self.current, target) else {
            debug!(from = ?self.current, to = ?target, "illegal transition rejected");
            return false;
        };
        self.previous = self.current;
        self.current = target;
        self.state_time = 0.0;
        self.total_transition = edge.duration;
        self.remaining_transition = edge.duration;
        self.curve = edge.curve;
        self.overrides = edge.overrides;
        true
    }

    /// Advance time and return the blended weight map
    pub fn update(&mut self, dt: f32) -> WeightMap {
        self.state_time += dt;
        self.remaining_transition = (self.remaining_transition - dt).max(0.0);
        self.shape_key_values()
    }

    /// Blended shape-key weights at the current instant
    ///
    /// Starts from the current state's targets; while a cross-fade runs,
    /// each key is blended from the previous state's weights with
    /// `blend = 1 - remaining / total` (mapped through the edge's curve).
    /// Keys absent from the current target fade from their previous value
    /// to zero. Transition overrides ride on a sine envelope so they vanish
    /// at both ends of the fade.
    pub fn shape_key_values(&self) -> WeightMap {
        let mut weights = WeightMap::new();
        let targets = self.current.target_weights();

        if !self.is_transitioning() {
            for &(key, value) in targets {
                weights.insert(key, value);
            }
            return weights;
        }

        let progress = 1.0 - self.remaining_transition / self.total_transition;
        let blend = self.curve.apply(progress);

        // Keys only in the current target fade in from zero
        for &(key, target_value) in targets {
            weights.insert(key, target_value * blend);
        }
        // Keys carried by the previous state blend prev -> target; absent
        // targets are zero, so those keys fade out
        for &(key, prev_value) in self.previous.target_weights() {
            let target_value = targets
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .unwrap_or(0.0);
            weights.insert(key, prev_value + (target_value - prev_value) * blend);
        }
        for &(key, accent) in self.overrides {
            let envelope = (PI * blend).sin();
            let entry = weights.entry(key).or_insert(0.0);
            *entry = (*entry + accent * envelope).clamp(0.0, 1.0);
        }

        weights
    }

    /// Force the hidden rest state with no transition
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Mark this machine as scheduled to start after `delay` seconds
    ///
    /// The negative state time marks a hidden instance as "not yet started";
    /// it counts back up to zero as the choreographer ticks toward the
    /// instance's start.
    pub(super) fn schedule(&mut self, delay: f32) {
        self.state_time = -delay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_transition_leaves_state_unchanged() {
        let mut machine = StateMachine::new();
        assert!(!machine.transition_to(AnimationState::Searching));
        assert_eq!(machine.current_state(), AnimationState::Hidden);
        assert!(!machine.is_transitioning());
        assert_eq!(machine.state_time(), 0.0);
    }

    #[test]
    fn test_legal_transition_resets_clock() {
        let mut machine = StateMachine::new();
        machine.update(3.0);
        assert!(machine.transition_to(AnimationState::Emerging));
        assert_eq!(machine.current_state(), AnimationState::Emerging);
        assert_eq!(machine.previous_state(), AnimationState::Hidden);
        assert_eq!(machine.state_time(), 0.0);
        assert!(machine.is_transitioning());
    }

    #[test]
    fn test_cross_fade_blends_previous_weights_out() {
        let mut machine = StateMachine::new();
        machine.transition_to(AnimationState::Emerging);

        // Halfway through the 1.2s ease-out fade: blend = 1 - 0.5^2 = 0.75,
        // so the hidden pose's compress key has faded from 1.0 to 0.25
        let weights = machine.update(0.6);
        let compress = weights[&ShapeKeyPreset::Compress50];
        assert!((compress - 0.25).abs() < 1e-5);

        // Fade complete: only the target weights remain
        let weights = machine.update(0.7);
        assert!(!machine.is_transitioning());
        assert!(weights.is_empty()); // Emerging targets the base pose
    }

    #[test]
    fn test_new_keys_fade_in_from_zero() {
        let mut machine = StateMachine::new();
        machine.transition_to(AnimationState::Emerging);
        machine.update(2.0);
        machine.transition_to(AnimationState::Searching);

        // Smooth curve at progress 0.5 is exactly 0.5
        let weights = machine.update(0.4);
        let curl = weights[&ShapeKeyPreset::CurlTip];
        assert!((curl - 0.4 * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_transition_invariant_holds_under_update() {
        let mut machine = StateMachine::new();
        machine.transition_to(AnimationState::Emerging);
        for _ in 0..20 {
            machine.update(0.1);
            assert!(machine.remaining_transition <= machine.total_transition);
            assert_eq!(
                machine.is_transitioning(),
                machine.remaining_transition > 0.0
            );
        }
    }

    #[test]
    fn test_overrides_vanish_at_fade_ends() {
        let mut machine = StateMachine::new();
        machine.transition_to(AnimationState::Emerging);
        machine.update(2.0);
        machine.transition_to(AnimationState::Searching);
        machine.update(1.0);
        assert!(machine.transition_to(AnimationState::Attacking));

        // Mid-fade the expand accent rides on top of the blended target
        let weights = machine.update(0.125);
        let blend = BlendCurve::EaseIn.apply(0.5);
        let expected = 0.6 * blend + 0.3 * (PI * blend).sin();
        assert!((weights[&ShapeKeyPreset::Expand125] - expected).abs() < 1e-4);

        // Once the fade finishes the accent is gone
        let weights = machine.update(0.2);
        assert!((weights[&ShapeKeyPreset::Expand125] - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_reset_forces_hidden() {
        let mut machine = StateMachine::new();
        machine.transition_to(AnimationState::Emerging);
        machine.update(0.1);
        machine.reset();
        assert_eq!(machine.current_state(), AnimationState::Hidden);
        assert!(!machine.is_transitioning());
        assert_eq!(machine.state_time(), 0.0);
    }
}
