//! Carousel scene behavior, and the scene split keeping the two scenes'
//! systems from leaking into each other.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::carousel::{CarouselRing, CarouselState, CAROUSEL_ROTATION_SPEED};
use crate::config;
use crate::keyboard::KeyBindings;
use crate::test_harness::TestRig;

#[test]
fn test_carousel_rotates_continuously() {
    let mut rig = TestRig::carousel();

    rig.tick(60);
    let rotation = rig.carousel_state().rotation;
    assert!((rotation - CAROUSEL_ROTATION_SPEED).abs() < CAROUSEL_ROTATION_SPEED * 0.05);

    rig.tick(60);
    assert!(rig.carousel_state().rotation > rotation);
}

#[test]
fn test_ring_toggle_key_freezes_one_ring() {
    let mut rig = TestRig::carousel();
    let keys = rig.app.world().resource::<KeyBindings>().clone();

    rig.press(keys.ring_toggles[0]);
    rig.tick(1);
    rig.release(keys.ring_toggles[0]);

    let frozen = rig.carousel_state().rings[0].height;
    let moving = rig.carousel_state().rings[1].height;
    rig.tick(120);

    let state = rig.carousel_state();
    assert!(!state.rings[0].enabled);
    assert_eq!(state.rings[0].height, frozen);
    assert_ne!(state.rings[1].height, moving);

    // Pressing the same key again resumes the oscillation.
    rig.press(keys.ring_toggles[0]);
    rig.tick(60);
    assert!(rig.carousel_state().rings[0].enabled);
    assert_ne!(rig.carousel_state().rings[0].height, frozen);
}

#[test]
fn test_ring_entity_tracks_ring_height() {
    let mut rig = TestRig::carousel();
    let ring = rig
        .app
        .world_mut()
        .spawn((
            CarouselRing { tier: 2 },
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    rig.tick(90);

    let height = rig.carousel_state().rings[2].height;
    let transform = rig.app.world().get::<Transform>(ring).unwrap();
    assert_eq!(transform.translation.y, height);
}

#[test]
fn test_rings_oscillate_within_their_bounds() {
    let mut rig = TestRig::carousel();

    // Long enough for every ring to bounce at least once.
    for _ in 0..20 {
        rig.tick(60);
        let state = rig.carousel_state();
        for (tier, ring) in state.rings.iter().enumerate() {
            let (lower, upper) = CarouselState::ring_bounds(tier);
            assert!(
                ring.height >= lower && ring.height <= upper,
                "ring {tier} at {} outside [{lower}, {upper}]",
                ring.height
            );
        }
    }

    // The inner ring is the fastest and has long since left its start.
    assert_ne!(
        rig.carousel_state().rings[0].height,
        CarouselState::ring_bounds(0).1
    );
}

#[test]
fn test_crane_systems_inert_in_carousel_scene() {
    let mut rig = TestRig::carousel();
    let keys = rig.app.world().resource::<KeyBindings>().clone();

    // A cargo inside the claw's reach must not start a cycle here.
    rig.spawn_cargo(
        Vec3::new(config::TROLLEY_HOME_X, 28.0, 0.0),
        config::CUBE_CARGO_RADIUS,
    );
    rig.press(keys.cable_down);
    rig.tick(120);

    assert!(!rig.sequencer().animating);
    assert_eq!(rig.rig().cable_travel, 0.0);
}

#[test]
fn test_carousel_frozen_in_crane_scene() {
    let mut rig = TestRig::new();

    rig.tick(120);

    let state = rig.carousel_state();
    assert_eq!(state.rotation, 0.0);
    for (tier, ring) in state.rings.iter().enumerate() {
        assert_eq!(ring.height, CarouselState::ring_bounds(tier).1);
    }
}

#[test]
fn test_full_revolution_takes_twenty_four_seconds() {
    // PI/12 per second: a full turn in 24 s of simulated time.
    let mut rig = TestRig::carousel();
    rig.tick(24 * 60);
    let rotation = rig.carousel_state().rotation;
    assert!((rotation - 2.0 * PI).abs() < 0.05, "rotation {rotation}");
}
