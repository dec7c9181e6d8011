//! The proximity trigger that starts a pick-and-place cycle.
//!
//! Cargo and claw are approximated as bounding spheres; the trigger is a
//! plain sphere-sphere overlap test. That coarseness is deliberate — the
//! scene wants "close enough to grab", not contact resolution.

use bevy::prelude::*;

use crate::attach::CargoGrabbed;
use crate::config;
use crate::rig::{RigClaw, RigState};
use crate::sequencer::Sequencer;

// =============================================================================
// Geometry
// =============================================================================

/// True iff two spheres overlap or touch: squared center distance is at most
/// the squared sum of radii. Kept squared so the per-frame scan never takes
/// a square root.
pub fn spheres_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    a.distance_squared(b) <= (radius_a + radius_b).powi(2)
}

// =============================================================================
// Cargo
// =============================================================================

/// A pickable body with its nominal bounding radius.
#[derive(Component, Debug, Clone, Copy)]
pub struct CargoBody {
    pub radius: f32,
}

/// Cargo entities in scene registration order. The trigger scans this list
/// front to back and takes the first overlap, so when several cargo overlap
/// the claw at once the winner is deterministic — a documented policy, not a
/// fallback. Delivered cargo is unregistered so a cycle cannot re-trigger on
/// the body it just put down.
#[derive(Resource, Debug, Default)]
pub struct CargoRegistry {
    entities: Vec<Entity>,
}

impl CargoRegistry {
    pub fn register(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn unregister(&mut self, entity: Entity) {
        self.entities.retain(|&e| e != entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// =============================================================================
// System
// =============================================================================

/// Scans registered cargo against the claw and starts a cycle on the first
/// overlap. Suppressed while a cycle is already running; the boolean and the
/// grab event are its only effects.
pub fn proximity_trigger(
    rig: Res<RigState>,
    registry: Res<CargoRegistry>,
    claw: Query<&GlobalTransform, With<RigClaw>>,
    cargo: Query<(&GlobalTransform, &CargoBody)>,
    mut seq: ResMut<Sequencer>,
    mut grabs: EventWriter<CargoGrabbed>,
) {
    if seq.animating {
        return;
    }
    let Ok(claw_transform) = claw.get_single() else {
        return;
    };
    let claw_pos = claw_transform.translation();

    for entity in registry.iter() {
        let Ok((transform, body)) = cargo.get(entity) else {
            continue;
        };
        if spheres_overlap(
            claw_pos,
            config::CLAW_RADIUS,
            transform.translation(),
            body.radius,
        ) {
            seq.begin_cycle(rig.cable_travel);
            grabs.send(CargoGrabbed { cargo: entity });
            info!("cargo {entity} in reach, starting pick-and-place cycle");
            return;
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct ProximityPlugin;

impl Plugin for ProximityPlugin {
    fn build(&self, app: &mut App) {
        // The trigger system itself is registered by `SequencerPlugin`,
        // chained between free movement and the cycle step.
        app.init_resource::<CargoRegistry>();
    }
}

// =============================================================================
// Tests
// =============================================================================
