//! Keyboard bindings and the key → intent-flag mapping.
//!
//! Bindings live in a resource so downstream systems (camera switching,
//! wireframe toggle, HUD labels) read the same table instead of hardcoding
//! `KeyCode`s. The two scenes reuse some physical keys for different
//! actions; scene run conditions keep the handlers apart.
//!
//! Intent flags follow held keys: key-down sets a flag, key-up clears it.
//! Flags are set even while a scripted cycle is running — the gate that
//! ignores them lives at the point of application, not here.

use bevy::prelude::*;

use crate::app_state::crane_active;
use crate::movement::MovementIntent;
use crate::RigUpdateSet;

// =============================================================================
// Bindings
// =============================================================================

/// Every key the two scenes respond to.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    // Crane free movement.
    pub rotate_positive: KeyCode,
    pub rotate_negative: KeyCode,
    pub trolley_out: KeyCode,
    pub trolley_in: KeyCode,
    pub cable_up: KeyCode,
    pub cable_down: KeyCode,
    pub claw_open: KeyCode,
    pub claw_close: KeyCode,

    // Crane view control.
    pub cameras: [KeyCode; 6],
    pub wireframe: KeyCode,

    // Carousel.
    pub ring_toggles: [KeyCode; 3],
    pub toggle_directional: KeyCode,
    pub toggle_ambient: KeyCode,
    pub toggle_point_lights: KeyCode,
    pub toggle_spotlights: KeyCode,
    pub shading_diffuse: KeyCode,
    pub shading_glossy: KeyCode,
    pub shading_normal: KeyCode,
    pub shading_unlit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotate_positive: KeyCode::KeyQ,
            rotate_negative: KeyCode::KeyA,
            trolley_out: KeyCode::KeyW,
            trolley_in: KeyCode::KeyS,
            cable_up: KeyCode::KeyE,
            cable_down: KeyCode::KeyD,
            claw_open: KeyCode::KeyR,
            claw_close: KeyCode::KeyF,

            cameras: [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
                KeyCode::Digit5,
                KeyCode::Digit6,
            ],
            wireframe: KeyCode::Digit7,

            ring_toggles: [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3],
            toggle_directional: KeyCode::KeyD,
            toggle_ambient: KeyCode::KeyA,
            toggle_point_lights: KeyCode::KeyP,
            toggle_spotlights: KeyCode::KeyS,
            shading_diffuse: KeyCode::KeyQ,
            shading_glossy: KeyCode::KeyW,
            shading_normal: KeyCode::KeyE,
            shading_unlit: KeyCode::KeyT,
        }
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Mirrors held movement keys into [`MovementIntent`] flags.
pub fn update_movement_intent(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut intent: ResMut<MovementIntent>,
) {
    intent.rotate_positive = keys.pressed(bindings.rotate_positive);
    intent.rotate_negative = keys.pressed(bindings.rotate_negative);
    intent.trolley_out = keys.pressed(bindings.trolley_out);
    intent.trolley_in = keys.pressed(bindings.trolley_in);
    intent.cable_up = keys.pressed(bindings.cable_up);
    intent.cable_down = keys.pressed(bindings.cable_down);
    intent.claw_open = keys.pressed(bindings.claw_open);
    intent.claw_close = keys.pressed(bindings.claw_close);
}

// =============================================================================
// Plugin
// =============================================================================

pub struct KeyboardPlugin;

impl Plugin for KeyboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>().add_systems(
            Update,
            update_movement_intent
                .in_set(RigUpdateSet::Input)
                .run_if(crane_active),
        );
    }
}
