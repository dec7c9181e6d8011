//! Free movement through the keyboard path, and the gate that locks it out
//! while a scripted cycle owns the rig.

use bevy::prelude::*;

use crate::config;
use crate::keyboard::KeyBindings;
use crate::test_harness::TestRig;

fn bindings(rig: &TestRig) -> KeyBindings {
    rig.app.world().resource::<KeyBindings>().clone()
}

#[test]
fn test_held_key_moves_the_trolley() {
    let mut rig = TestRig::new();
    let keys = bindings(&rig);
    let speed = rig.tuning().horizontal_speed;

    rig.press(keys.trolley_out);
    rig.tick(60);

    // One second of outward travel, within a frame of rounding.
    let travel = rig.rig().trolley_travel;
    assert!((travel - speed).abs() < speed * 0.05, "travel {travel}");
}

#[test]
fn test_released_key_stops_motion() {
    let mut rig = TestRig::new();
    let keys = bindings(&rig);

    rig.press(keys.rotate_positive);
    rig.tick(30);
    rig.release(keys.rotate_positive);
    rig.tick(1);

    let settled = rig.rig().crane_angle;
    assert!(settled > 0.0);
    rig.tick(60);
    assert_eq!(rig.rig().crane_angle, settled);
}

#[test]
fn test_travel_limits_hold_under_held_keys() {
    let mut rig = TestRig::new();
    let keys = bindings(&rig);
    let tuning = rig.tuning();

    rig.press(keys.cable_down);
    rig.tick(2_000);
    assert_eq!(rig.rig().cable_travel, tuning.min_cable_travel);

    rig.release(keys.cable_down);
    rig.press(keys.cable_up);
    rig.tick(3_000);
    assert_eq!(rig.rig().cable_travel, tuning.max_cable_travel);
}

#[test]
fn test_movement_keys_ignored_while_cycle_runs() {
    let mut rig = TestRig::new();
    let keys = bindings(&rig);

    // Put a cargo in reach so a cycle starts immediately.
    rig.spawn_cargo(
        Vec3::new(config::TROLLEY_HOME_X, 28.0, 0.0),
        config::CUBE_CARGO_RADIUS,
    );
    rig.tick(2);
    assert!(rig.sequencer().animating);

    // ClosingClaw only moves the fingers; held cable and trolley keys must
    // leave their scalars untouched.
    rig.press(keys.cable_down);
    rig.press(keys.trolley_out);
    rig.tick(60);

    assert!(rig.sequencer().animating);
    assert_eq!(rig.rig().cable_travel, 0.0);
    assert_eq!(rig.rig().trolley_travel, 0.0);
}

#[test]
fn test_movement_resumes_after_cycle_completes() {
    let mut rig = TestRig::new();
    let keys = bindings(&rig);

    rig.spawn_cargo(
        Vec3::new(config::TROLLEY_HOME_X, 28.0, 0.0),
        config::CUBE_CARGO_RADIUS,
    );
    rig.tick(2);
    for _ in 0..5_000 {
        if !rig.sequencer().animating {
            break;
        }
        rig.tick(1);
    }
    assert!(!rig.sequencer().animating);

    let before = rig.rig().cable_travel;
    rig.press(keys.cable_down);
    rig.tick(30);
    assert!(rig.rig().cable_travel < before);
}

#[test]
fn test_jib_transform_follows_rotation() {
    let mut rig = TestRig::new();
    let keys = bindings(&rig);

    rig.press(keys.rotate_positive);
    rig.tick(60);
    rig.release(keys.rotate_positive);
    rig.tick(1);

    // The trolley rides the jib: one second of slewing swings its world
    // position around the tower axis.
    let angle = rig.rig().crane_angle;
    let trolley = rig.world_pos(rig.frames.trolley);
    let expected = Quat::from_rotation_y(angle) * Vec3::new(config::TROLLEY_HOME_X, 0.0, 0.0);
    assert!((trolley.x - expected.x).abs() < 1e-3);
    assert!((trolley.z - expected.z).abs() < 1e-3);
}
