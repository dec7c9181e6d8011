//! Carousel animation state.
//!
//! The carousel spins at a constant rate; its three concentric rings
//! oscillate vertically between the middle of the central cylinder and a
//! per-tier top bound, reversing direction at each bound. Seats spin slowly
//! about their own fixed, slightly tilted axes. Like the crane rig, all of
//! it is plain state stepped in `Drive` and mirrored into `Transform`s in
//! `Sync`.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::Rng;

use crate::app_state::carousel_active;
use crate::config;
use crate::keyboard::KeyBindings;
use crate::RigUpdateSet;

/// Base rotation speed of the whole carousel, radians per second.
pub const CAROUSEL_ROTATION_SPEED: f32 = PI / 12.0;

/// Seat self-rotation speed, radians per second.
pub const SEAT_SPIN_SPEED: f32 = 0.3;

/// Vertical oscillation speed per ring tier, inner to outer.
pub const RING_SPEEDS: [f32; 3] = [4.0, 3.0, 2.0];

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingState {
    /// Oscillation on/off; a disabled ring holds its height.
    pub enabled: bool,
    /// Current height of the ring plane above the carousel base.
    pub height: f32,
    pub descending: bool,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CarouselState {
    /// Accumulated base rotation about the vertical axis.
    pub rotation: f32,
    /// Inner, middle, outer ring.
    pub rings: [RingState; 3],
}

impl Default for CarouselState {
    fn default() -> Self {
        let rings = std::array::from_fn(|tier| RingState {
            enabled: true,
            height: Self::ring_bounds(tier).1,
            descending: true,
        });
        Self {
            rotation: 0.0,
            rings,
        }
    }
}

impl CarouselState {
    /// Lower and upper height bounds for a ring tier (0 = inner).
    pub fn ring_bounds(tier: usize) -> (f32, f32) {
        (
            config::CAROUSEL_CYLINDER_HEIGHT / 2.0,
            config::CAROUSEL_CYLINDER_HEIGHT + (tier as f32 + 1.0) * config::RING_HEIGHT,
        )
    }
}

// =============================================================================
// Step
// =============================================================================

/// Advances the carousel by one frame of `dt` seconds.
pub fn step(state: &mut CarouselState, dt: f32) {
    state.rotation += CAROUSEL_ROTATION_SPEED * dt;

    for (tier, ring) in state.rings.iter_mut().enumerate() {
        if !ring.enabled {
            continue;
        }
        let (lower, upper) = CarouselState::ring_bounds(tier);
        let speed = RING_SPEEDS[tier];
        if ring.descending {
            ring.height -= speed * dt;
            if ring.height <= lower {
                ring.height = lower;
                ring.descending = false;
            }
        } else {
            ring.height += speed * dt;
            if ring.height >= upper {
                ring.height = upper;
                ring.descending = true;
            }
        }
    }
}

// =============================================================================
// Scene markers
// =============================================================================

/// Root frame of the carousel; spins about the vertical axis.
#[derive(Component)]
pub struct CarouselRoot;

/// One of the three oscillating rings.
#[derive(Component)]
pub struct CarouselRing {
    pub tier: usize,
}

/// A seat riding a ring, spinning about its own tilted axis.
#[derive(Component)]
pub struct CarouselSeat {
    pub spin_axis: Dir3,
}

/// A slightly off-vertical spin axis for a seat.
pub fn seat_spin_axis(rng: &mut impl Rng) -> Dir3 {
    let axis = Vec3::new(rng.gen_range(1.0..1.1), 1.0, 0.0).normalize();
    Dir3::new(axis).unwrap_or(Dir3::Y)
}

// =============================================================================
// Systems
// =============================================================================

/// Flips ring oscillation on number-key presses.
pub fn toggle_rings(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut state: ResMut<CarouselState>,
) {
    for (tier, &key) in bindings.ring_toggles.iter().enumerate() {
        if keys.just_pressed(key) {
            state.rings[tier].enabled = !state.rings[tier].enabled;
        }
    }
}

pub fn run_carousel(time: Res<Time>, mut state: ResMut<CarouselState>) {
    step(&mut state, time.delta_secs());
}

pub fn sync_carousel_root(
    state: Res<CarouselState>,
    mut query: Query<&mut Transform, With<CarouselRoot>>,
) {
    for mut transform in &mut query {
        transform.rotation = Quat::from_rotation_y(state.rotation);
    }
}

pub fn sync_carousel_rings(
    state: Res<CarouselState>,
    mut query: Query<(&CarouselRing, &mut Transform)>,
) {
    for (ring, mut transform) in &mut query {
        transform.translation.y = state.rings[ring.tier].height;
    }
}

pub fn spin_seats(time: Res<Time>, mut query: Query<(&CarouselSeat, &mut Transform)>) {
    let angle = SEAT_SPIN_SPEED * time.delta_secs();
    for (seat, mut transform) in &mut query {
        transform.rotate_axis(seat.spin_axis, angle);
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct CarouselPlugin;

impl Plugin for CarouselPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CarouselState>()
            .add_systems(
                Update,
                toggle_rings
                    .in_set(RigUpdateSet::Input)
                    .run_if(carousel_active),
            )
            .add_systems(
                Update,
                run_carousel
                    .in_set(RigUpdateSet::Drive)
                    .run_if(carousel_active),
            )
            .add_systems(
                Update,
                (sync_carousel_root, sync_carousel_rings, spin_seats)
                    .in_set(RigUpdateSet::Sync)
                    .run_if(carousel_active),
            );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_rotation_accumulates() {
        let mut state = CarouselState::default();
        step(&mut state, 1.0);
        assert!((state.rotation - CAROUSEL_ROTATION_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_rings_start_at_their_top_bound() {
        let state = CarouselState::default();
        for (tier, ring) in state.rings.iter().enumerate() {
            assert_eq!(ring.height, CarouselState::ring_bounds(tier).1);
            assert!(ring.descending);
        }
    }

    #[test]
    fn test_ring_reverses_at_lower_bound() {
        let mut state = CarouselState::default();
        let (lower, _) = CarouselState::ring_bounds(0);
        // Run long enough for the inner ring to reach the bottom.
        for _ in 0..10_000 {
            step(&mut state, DT);
            if !state.rings[0].descending {
                break;
            }
        }
        assert!(!state.rings[0].descending);
        assert_eq!(state.rings[0].height, lower);
    }

    #[test]
    fn test_ring_stays_within_bounds() {
        let mut state = CarouselState::default();
        for _ in 0..100_000 {
            step(&mut state, DT);
            for (tier, ring) in state.rings.iter().enumerate() {
                let (lower, upper) = CarouselState::ring_bounds(tier);
                assert!(ring.height >= lower && ring.height <= upper);
            }
        }
    }

    #[test]
    fn test_disabled_ring_holds_height() {
        let mut state = CarouselState::default();
        state.rings[1].enabled = false;
        let held = state.rings[1].height;
        for _ in 0..1_000 {
            step(&mut state, DT);
        }
        assert_eq!(state.rings[1].height, held);
        // The other rings kept moving.
        assert_ne!(state.rings[0].height, CarouselState::ring_bounds(0).1);
    }

    #[test]
    fn test_outer_rings_oscillate_slower() {
        assert!(RING_SPEEDS[0] > RING_SPEEDS[1]);
        assert!(RING_SPEEDS[1] > RING_SPEEDS[2]);
    }

    #[test]
    fn test_seat_spin_axis_is_tilted() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let axis = seat_spin_axis(&mut rng);
        assert!(axis.x > 0.0);
        assert!(axis.y > 0.0);
        assert_eq!(axis.z, 0.0);
    }
}
