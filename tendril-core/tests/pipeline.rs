//! End-to-end pipeline: spec -> body -> suckers -> shape keys -> LOD chain

use tendril_core::prelude::*;

fn reference_spec() -> TentacleSpec {
    TentacleSpec {
        length: 1.0,
        base_radius: 0.04,
        tip_radius: 0.01,
        segments: 20,
        resolution: 16,
        taper: TaperKind::Organic,
        seed: 42,
        ..Default::default()
    }
}

#[test]
fn full_pipeline_produces_consistent_artifacts() {
    let generator = TentacleGenerator::new(reference_spec()).unwrap();
    let mesh = generator.generate();
    assert_eq!(mesh.vertex_count(), 336);
    assert_eq!(mesh.quad_count(), 320);

    let sucker_spec = SuckerSpec::default();
    let suckers = place_suckers(&sucker_spec, 1.0, |t| generator.radius_at(t)).unwrap();
    assert_eq!(
        suckers.len(),
        (sucker_spec.rows * sucker_spec.columns) as usize
    );
    // Every sucker sits inside the body's silhouette along z
    for sucker in &suckers {
        assert!(sucker.position.z >= 0.0 && sucker.position.z <= 1.0);
        assert!(sucker.size > 0.0);
    }

    let axis = TentacleAxis::estimate(&mesh);
    let shape_keys = generate_shape_keys(&mesh, &axis);
    assert_eq!(shape_keys.len(), 9);
    for key in &shape_keys {
        assert_eq!(key.offsets.len(), mesh.vertex_count());
    }

    let lods = generate_lods(&mesh, &LodLevel::default_chain()).unwrap();
    assert_eq!(lods.len(), 4);
    assert_eq!(lods[0].vertex_count, 336);
    for pair in lods.windows(2) {
        assert!(pair[1].vertex_count <= pair[0].vertex_count);
        assert!(pair[1].vertex_count >= 4);
    }
}

#[test]
fn generation_is_bit_identical_across_calls() {
    let a = TentacleGenerator::new(reference_spec()).unwrap().generate();
    let b = TentacleGenerator::new(reference_spec()).unwrap().generate();
    assert_eq!(a, b);
}

#[test]
fn choreography_scenario_from_reference() {
    let mut choreo = Choreographer::new(4, 0.0, 0.1);
    choreo.trigger_emergence();
    choreo.update(0.05);
    choreo.update(0.1);

    let states = choreo.states();
    assert_eq!(states[0], AnimationState::Emerging);
    assert_eq!(states[1], AnimationState::Emerging);
    assert_eq!(states[2], AnimationState::Hidden);
    assert_eq!(states[3], AnimationState::Hidden);
}

#[test]
fn animation_drives_shape_key_weights_through_a_hunt() {
    let mut machine = StateMachine::new();
    assert!(machine.transition_to(AnimationState::Emerging));
    machine.update(2.0);
    assert!(machine.transition_to(AnimationState::Searching));
    machine.update(1.0);
    assert!(machine.transition_to(AnimationState::Attacking));
    machine.update(1.0);
    assert!(machine.transition_to(AnimationState::Retracting));
    let weights = machine.update(5.0);

    // Settled in the retracting pose
    assert!(!machine.is_transitioning());
    assert_eq!(weights[&ShapeKeyPreset::Compress50], 1.0);

    // Weight keys always name real shape keys a host registered
    for key in weights.keys() {
        assert!(ShapeKeyPreset::ALL.contains(key));
    }
}
