//! Free (user-driven) movement of the rig.
//!
//! Key-down/up toggles set boolean intent flags; once per frame the flags are
//! turned into clamped, dt-scaled displacements on [`RigState`]. While a
//! pick-and-place cycle is running the flags may still be toggled, but this
//! module is the only writer that honors them, and it refuses to apply them —
//! that single gate is what keeps user input and the sequencer from fighting
//! over the same transforms.

use bevy::prelude::*;

use crate::rig::RigState;
use crate::sequencer::Sequencer;
use crate::tuning::RigTuning;

// =============================================================================
// Intent flags
// =============================================================================

/// User movement intents, one flag per held key.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MovementIntent {
    pub rotate_positive: bool,
    pub rotate_negative: bool,
    pub trolley_out: bool,
    pub trolley_in: bool,
    pub cable_up: bool,
    pub cable_down: bool,
    pub claw_open: bool,
    pub claw_close: bool,
}

// =============================================================================
// Application
// =============================================================================

/// Applies intent flags to the rig state for one frame of `dt` seconds.
///
/// Travel limits clamp; they never wrap. Jib rotation is unbounded, matching
/// the physical rig (a slewing crane has no rotation stop).
pub fn apply_intent(rig: &mut RigState, intent: &MovementIntent, tuning: &RigTuning, dt: f32) {
    if intent.rotate_positive {
        rig.crane_angle += tuning.rotation_speed * dt;
    }
    if intent.rotate_negative {
        rig.crane_angle -= tuning.rotation_speed * dt;
    }

    if intent.trolley_out {
        rig.trolley_travel =
            (rig.trolley_travel + tuning.horizontal_speed * dt).min(tuning.max_trolley_travel);
    }
    if intent.trolley_in {
        rig.trolley_travel =
            (rig.trolley_travel - tuning.horizontal_speed * dt).max(tuning.min_trolley_travel);
    }

    if intent.cable_up {
        rig.cable_travel =
            (rig.cable_travel + tuning.vertical_speed * dt).min(tuning.max_cable_travel);
    }
    if intent.cable_down {
        rig.cable_travel =
            (rig.cable_travel - tuning.vertical_speed * dt).max(tuning.min_cable_travel);
    }

    if intent.claw_close {
        rig.claw_angle = (rig.claw_angle + tuning.claw_speed * dt).min(tuning.max_claw_angle);
    }
    if intent.claw_open {
        rig.claw_angle = (rig.claw_angle - tuning.claw_speed * dt).max(tuning.min_claw_angle);
    }
}

/// System: applies free movement unless a scripted cycle owns the rig.
pub fn apply_free_movement(
    time: Res<Time>,
    intent: Res<MovementIntent>,
    sequencer: Res<Sequencer>,
    tuning: Res<RigTuning>,
    mut rig: ResMut<RigState>,
) {
    if sequencer.animating {
        return;
    }
    apply_intent(&mut rig, &intent, &tuning, time.delta_secs());
}

// =============================================================================
// Plugin
// =============================================================================

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        // The system itself is registered by `SequencerPlugin`, chained
        // before the trigger and the cycle step.
        app.init_resource::<MovementIntent>();
    }
}

// =============================================================================
// Tests
// =============================================================================
