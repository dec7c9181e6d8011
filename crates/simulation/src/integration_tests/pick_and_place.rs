//! Full pick-and-place cycles through the real app schedule: keyboard →
//! movement → proximity trigger → sequencer → attach/release, with transform
//! propagation running between frames.

use bevy::prelude::*;

use crate::config;
use crate::sequencer::Phase;
use crate::test_harness::TestRig;

/// Claw world position at spawn: base half-height, jib height, trolley seat
/// offset, cable rest length.
const CLAW_SPAWN: Vec3 = Vec3::new(config::TROLLEY_HOME_X, 30.3, 0.0);

/// Runs frames until the current cycle finishes, panicking if it never does.
fn run_cycle_to_completion(rig: &mut TestRig) {
    for _ in 0..5_000 {
        if !rig.sequencer().animating {
            return;
        }
        rig.tick(1);
    }
    panic!("cycle did not complete: {:?}", rig.sequencer());
}

#[test]
fn test_cargo_in_reach_starts_a_cycle() {
    let mut rig = TestRig::new();
    let cargo = rig.spawn_cargo(CLAW_SPAWN - Vec3::Y * 2.3, config::CUBE_CARGO_RADIUS);

    // One frame to propagate the cargo transform, one for the trigger.
    rig.tick(2);

    assert!(rig.sequencer().animating);
    assert_eq!(rig.sequencer().phase, Phase::ClosingClaw);
    assert_eq!(rig.carried(), Some(cargo));
}

#[test]
fn test_grab_preserves_cargo_world_position() {
    let mut rig = TestRig::new();
    let spawn_pos = CLAW_SPAWN - Vec3::Y * 2.3;
    let cargo = rig.spawn_cargo(spawn_pos, config::CUBE_CARGO_RADIUS);

    rig.tick(2);

    assert_eq!(rig.parent_of(cargo), Some(rig.frames.claw));
    let after = rig.world_pos(cargo);
    assert!(
        after.distance(spawn_pos) < 1e-3,
        "cargo jumped on grab: {spawn_pos} -> {after}"
    );
}

#[test]
fn test_cycle_delivers_and_returns_home() {
    let mut rig = TestRig::new();
    let spawn_pos = CLAW_SPAWN - Vec3::Y * 2.3;
    let cargo = rig.spawn_cargo(spawn_pos, config::CUBE_CARGO_RADIUS);

    rig.tick(2);
    assert!(rig.sequencer().animating);
    run_cycle_to_completion(&mut rig);

    // The rig round-trips: claw open, cable and trolley back where the
    // trigger found them, jib parked at the deposit offset.
    let state = rig.rig();
    let tuning = rig.tuning();
    assert_eq!(state.claw_angle, 0.0);
    assert_eq!(state.cable_travel, 0.0);
    assert_eq!(state.trolley_travel, 0.0);
    assert!(state.crane_angle >= tuning.deposit_offset);
    assert!(state.crane_angle < tuning.deposit_offset + tuning.rotation_speed * 0.1);

    // The cargo is detached at the deposit heading, at its pickup height.
    assert_eq!(rig.carried(), None);
    assert_eq!(rig.parent_of(cargo), None);
    let expected = Quat::from_rotation_y(state.crane_angle) * spawn_pos;
    let delivered = rig.world_pos(cargo);
    assert!(
        delivered.distance(expected) < 1e-2,
        "expected {expected}, got {delivered}"
    );
}

#[test]
fn test_delivered_cargo_does_not_retrigger() {
    let mut rig = TestRig::new();
    rig.spawn_cargo(CLAW_SPAWN - Vec3::Y * 2.3, config::CUBE_CARGO_RADIUS);

    rig.tick(2);
    run_cycle_to_completion(&mut rig);

    // The delivered body may still overlap the claw, but it was unregistered
    // on release, so the trigger stays quiet.
    rig.tick(120);
    assert!(!rig.sequencer().animating);
}

#[test]
fn test_keyboard_descent_grab_and_roundtrip() {
    let mut rig = TestRig::new();
    let ground_pos = Vec3::new(config::TROLLEY_HOME_X, 2.0, 0.0);
    let cargo = rig.spawn_cargo(ground_pos, config::CUBE_CARGO_RADIUS);
    let bindings = rig.app.world().resource::<crate::keyboard::KeyBindings>().clone();

    // Lower the cable toward the ground until the trigger fires.
    rig.press(bindings.cable_down);
    for _ in 0..2_000 {
        rig.tick(1);
        if rig.sequencer().animating {
            break;
        }
    }
    assert!(rig.sequencer().animating, "claw never reached the cargo");
    rig.release(bindings.cable_down);

    let pickup_cable = rig.rig().cable_travel;
    assert!(pickup_cable < -20.0);

    run_cycle_to_completion(&mut rig);

    // Descending returns to exactly the cable travel recorded at the grab,
    // so the cargo is set down at its pickup height.
    let state = rig.rig();
    assert_eq!(state.cable_travel, pickup_cable);
    assert_eq!(state.claw_angle, 0.0);
    assert_eq!(rig.parent_of(cargo), None);

    let delivered = rig.world_pos(cargo);
    let expected = Quat::from_rotation_y(state.crane_angle) * ground_pos;
    assert!(
        delivered.distance(expected) < 1e-2,
        "expected {expected}, got {delivered}"
    );
}

#[test]
fn test_first_registered_cargo_wins_when_two_are_in_reach() {
    let mut rig = TestRig::new();
    let first = rig.spawn_cargo(CLAW_SPAWN - Vec3::Y * 2.3, config::CUBE_CARGO_RADIUS);
    let _second = rig.spawn_cargo(CLAW_SPAWN + Vec3::Y * 2.3, config::CUBE_CARGO_RADIUS);

    rig.tick(2);

    assert_eq!(rig.carried(), Some(first));
}
