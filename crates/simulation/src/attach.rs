//! Cargo ownership transfer between the world root and the claw frame.
//!
//! Grabbing re-parents the cargo entity under the claw so every subsequent
//! rig movement carries it along; releasing re-parents it back to the world
//! root at wherever the cycle left it. In both directions the cargo's world
//! transform is preserved: the local transform is rewritten against the new
//! parent before the hierarchy changes, so the mesh never jumps on screen.
//!
//! Parent links are plain entity references in Bevy's hierarchy — an index
//! into the entity table, not a shared pointer — so the re-parenting cannot
//! create ownership cycles.

use bevy::prelude::*;

use crate::app_state::crane_active;
use crate::proximity::{CargoBody, CargoRegistry};
use crate::rig::RigClaw;
use crate::RigUpdateSet;

// =============================================================================
// Events and state
// =============================================================================

/// Sent by the proximity trigger on the frame a cargo comes within reach.
#[derive(Event, Debug, Clone, Copy)]
pub struct CargoGrabbed {
    pub cargo: Entity,
}

/// Sent by the sequencer on the frame a cycle completes.
#[derive(Event, Debug, Clone, Copy)]
pub struct CargoReleased {
    pub cargo: Entity,
}

/// The cargo currently re-parented under the claw, if any. At most one
/// cargo is ever attached.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CarriedCargo(pub Option<Entity>);

// =============================================================================
// Systems
// =============================================================================

/// Attaches grabbed cargo under the claw frame, preserving world transform.
pub fn attach_grabbed_cargo(
    mut commands: Commands,
    mut events: EventReader<CargoGrabbed>,
    mut carried: ResMut<CarriedCargo>,
    claw: Query<(Entity, &GlobalTransform), With<RigClaw>>,
    mut cargo: Query<(&GlobalTransform, &mut Transform), With<CargoBody>>,
) {
    for event in events.read() {
        let Ok((claw_entity, claw_global)) = claw.get_single() else {
            continue;
        };
        let Ok((cargo_global, mut cargo_local)) = cargo.get_mut(event.cargo) else {
            continue;
        };
        *cargo_local = cargo_global.reparented_to(claw_global);
        commands.entity(event.cargo).set_parent(claw_entity);
        carried.0 = Some(event.cargo);
    }
}

/// Detaches released cargo back to the world root at its current world
/// position and unregisters it so the trigger cannot immediately re-fire on
/// a body the claw is still touching.
pub fn release_carried_cargo(
    mut commands: Commands,
    mut events: EventReader<CargoReleased>,
    mut carried: ResMut<CarriedCargo>,
    mut registry: ResMut<CargoRegistry>,
    mut cargo: Query<(&GlobalTransform, &mut Transform), With<CargoBody>>,
) {
    for event in events.read() {
        if let Ok((cargo_global, mut cargo_local)) = cargo.get_mut(event.cargo) {
            *cargo_local = cargo_global.reparented_to(&GlobalTransform::IDENTITY);
            commands.entity(event.cargo).remove_parent();
        }
        registry.unregister(event.cargo);
        carried.0 = None;
        info!("cargo {} delivered", event.cargo);
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct AttachPlugin;

impl Plugin for AttachPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CargoGrabbed>()
            .add_event::<CargoReleased>()
            .init_resource::<CarriedCargo>()
            .add_systems(
                Update,
                (attach_grabbed_cargo, release_carried_cargo)
                    .chain()
                    .in_set(RigUpdateSet::Drive)
                    .after(crate::sequencer::run_sequencer)
                    .run_if(crane_active),
            );
    }
}
