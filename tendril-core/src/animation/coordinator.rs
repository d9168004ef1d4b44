//! Multi-instance choreography
//!
//! Owns N independent state machines and staggers their entrance so a group
//! of tentacles emerges one after another instead of in lockstep.

use std::f32::consts::TAU;
use tracing::debug;

use super::machine::{StateMachine, WeightMap};
use super::states::AnimationState;

/// Coordinator for a group of tentacle state machines
#[derive(Clone, Debug)]
pub struct Choreographer {
    instances: Vec<StateMachine>,
    /// Instances already promoted out of hidden for the current trigger, so
    /// a tentacle that later returns to hidden is not re-launched
    emerged: Vec<bool>,
    /// Delay before the first instance starts emerging
    base_delay: f32,
    /// Additional delay between consecutive instances
    stagger_delay: f32,
    /// Global time since construction or reset
    elapsed: f32,
    emergence_triggered: bool,
}

impl Choreographer {
    /// Create `count` hidden instances
    pub fn new(count: usize, base_delay: f32, stagger_delay: f32) -> Self {
        Self {
            instances: vec![StateMachine::new(); count],
            emerged: vec![false; count],
            base_delay,
            stagger_delay,
            elapsed: 0.0,
            emergence_triggered: false,
        }
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instance(&self, index: usize) -> &StateMachine {
        &self.instances[index]
    }

    /// Current state of every instance, in index order
    pub fn states(&self) -> Vec<AnimationState> {
        self.instances.iter().map(StateMachine::current_state).collect()
    }

    /// Even angular placement of the instances around a circle, in radians
    pub fn layout_angles(&self) -> Vec<f32> {
        let n = self.instances.len().max(1);
        (0..self.instances.len())
            .map(|i| i as f32 / n as f32 * TAU)
            .collect()
    }

    /// Scheduled emergence delay of instance `index`
    pub fn emergence_delay(&self, index: usize) -> f32 {
        self.base_delay + index as f32 * self.stagger_delay
    }

    /// Request staggered emergence for every hidden instance
    pub fn trigger_emergence(&mut self) {
        self.emergence_triggered = true;
        for i in 0..self.instances.len() {
            let delay = self.emergence_delay(i);
            let machine = &mut self.instances[i];
            if machine.current_state() == AnimationState::Hidden {
                machine.schedule(delay);
                self.emerged[i] = false;
            }
        }
        debug!(count = self.instances.len(), "emergence triggered");
    }

    /// Request retraction on every instance; illegal edges fail silently
    pub fn trigger_retraction(&mut self) {
        for machine in &mut self.instances {
            let _ = machine.transition_to(AnimationState::Retracting);
        }
    }

    /// Request an attack from every instance currently searching
    pub fn trigger_attack(&mut self) {
        for machine in &mut self.instances {
            if machine.current_state() == AnimationState::Searching {
                machine.transition_to(AnimationState::Attacking);
            }
        }
    }

    /// Advance global time, start any due instances, and update them all
    ///
    /// Returns each instance's blended weight map in index order.
    pub fn update(&mut self, dt: f32) -> Vec<WeightMap> {
        self.elapsed += dt;

        if self.emergence_triggered {
            for i in 0..self.instances.len() {
                let due = self.elapsed >= self.emergence_delay(i);
                let machine = &mut self.instances[i];
                if !self.emerged[i] && machine.current_state() == AnimationState::Hidden && due {
                    machine.transition_to(AnimationState::Emerging);
                    self.emerged[i] = true;
                }
            }
        }

        self.instances
            .iter_mut()
            .map(|machine| machine.update(dt))
            .collect()
    }

    /// Return every instance to hidden and clear the global clock
    pub fn reset(&mut self) {
        for machine in &mut self.instances {
            machine.reset();
        }
        self.emerged.fill(false);
        self.elapsed = 0.0;
        self.emergence_triggered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staggered_emergence_order() {
        let mut choreo = Choreographer::new(4, 0.0, 0.1);
        choreo.trigger_emergence();

        choreo.update(0.05);
        choreo.update(0.1);

        assert_eq!(
            choreo.states(),
            vec![
                AnimationState::Emerging,
                AnimationState::Emerging,
                AnimationState::Hidden,
                AnimationState::Hidden,
            ]
        );
    }

    #[test]
    fn test_zero_delay_instance_emerges_on_first_tick() {
        let mut choreo = Choreographer::new(1, 0.0, 0.0);
        choreo.trigger_emergence();
        choreo.update(0.05);
        assert_eq!(choreo.instance(0).current_state(), AnimationState::Emerging);
    }

    #[test]
    fn test_emergence_delay_per_instance() {
        let choreo = Choreographer::new(3, 0.2, 0.35);
        assert!((choreo.emergence_delay(0) - 0.2).abs() < 1e-6);
        assert!((choreo.emergence_delay(1) - 0.55).abs() < 1e-6);
        assert!((choreo.emergence_delay(2) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_no_emergence_before_trigger() {
        let mut choreo = Choreographer::new(3, 0.0, 0.1);
        choreo.update(10.0);
        assert!(choreo.states().iter().all(|s| *s == AnimationState::Hidden));
    }

    #[test]
    fn test_base_delay_holds_first_instance() {
        let mut choreo = Choreographer::new(2, 0.5, 0.25);
        choreo.trigger_emergence();
        choreo.update(0.4);
        assert_eq!(choreo.instance(0).current_state(), AnimationState::Hidden);
        choreo.update(0.2);
        assert_eq!(choreo.instance(0).current_state(), AnimationState::Emerging);
        assert_eq!(choreo.instance(1).current_state(), AnimationState::Hidden);
    }

    #[test]
    fn test_attack_only_from_searching() {
        let mut choreo = Choreographer::new(2, 0.0, 0.0);
        choreo.trigger_emergence();
        choreo.update(0.01);

        // Walk instance 0 into Searching by driving its machine through the
        // public trigger path: both are Emerging now, so retract instance 1
        // and advance instance 0 to Searching
        choreo.instances[0].transition_to(AnimationState::Searching);
        choreo.instances[1].transition_to(AnimationState::Retracting);

        choreo.trigger_attack();
        assert_eq!(choreo.instance(0).current_state(), AnimationState::Attacking);
        assert_eq!(
            choreo.instance(1).current_state(),
            AnimationState::Retracting
        );
    }

    #[test]
    fn test_retraction_fails_silently_for_hidden() {
        let mut choreo = Choreographer::new(2, 0.0, 0.0);
        choreo.trigger_retraction();
        assert!(choreo.states().iter().all(|s| *s == AnimationState::Hidden));
    }

    #[test]
    fn test_weight_maps_returned_per_instance() {
        let mut choreo = Choreographer::new(3, 0.0, 10.0);
        choreo.trigger_emergence();
        let weights = choreo.update(0.1);
        assert_eq!(weights.len(), 3);
        // Instance 0 is cross-fading out of hidden; the rest still hold it
        assert!(weights[0][&crate::deform::ShapeKeyPreset::Compress50] < 1.0);
        assert_eq!(weights[1][&crate::deform::ShapeKeyPreset::Compress50], 1.0);
    }

    #[test]
    fn test_layout_angles_even() {
        let choreo = Choreographer::new(4, 0.0, 0.0);
        let angles = choreo.layout_angles();
        assert_eq!(angles.len(), 4);
        assert!((angles[1] - TAU / 4.0).abs() < 1e-6);
        assert!((angles[3] - 3.0 * TAU / 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_schedule() {
        let mut choreo = Choreographer::new(2, 0.0, 0.1);
        choreo.trigger_emergence();
        choreo.update(1.0);
        choreo.reset();
        assert!(choreo.states().iter().all(|s| *s == AnimationState::Hidden));
        // A fresh update without a trigger leaves everything hidden
        choreo.update(1.0);
        assert!(choreo.states().iter().all(|s| *s == AnimationState::Hidden));
    }
}
