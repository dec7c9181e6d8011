//! Runtime-tunable speeds and thresholds for the crane rig.
//!
//! The threshold constants vary between coursework-era revisions of this
//! scene without explanation, so none of them are treated as authoritative:
//! everything lives in the [`RigTuning`] resource with defaults from the most
//! complete revision, and can be overridden by pointing `GANTRY_TUNING` at a
//! JSON file containing any subset of the fields.

use std::f32::consts::PI;
use std::fs;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config;

/// Environment variable naming a JSON tuning override file.
pub const TUNING_ENV_VAR: &str = "GANTRY_TUNING";

// =============================================================================
// Resource
// =============================================================================

/// Speeds and thresholds driving both free movement and the pick-and-place
/// sequencer. Angles are radians, distances world units, speeds per second.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigTuning {
    /// Slewing speed of the jib assembly about the tower axis.
    pub rotation_speed: f32,
    /// Trolley travel speed along the jib.
    pub horizontal_speed: f32,
    /// Hoist cable raise/lower speed.
    pub vertical_speed: f32,
    /// Claw finger open/close angular speed.
    pub claw_speed: f32,

    /// Finger angle at which the claw counts as fully closed.
    pub max_claw_angle: f32,
    /// Most-open finger angle reachable in free movement.
    pub min_claw_angle: f32,

    /// Jib angle (from the spawn heading) over the deposit site.
    pub deposit_offset: f32,
    /// Cable travel the hoist phase raises the cargo to before slewing;
    /// high enough that every cargo clears the ground.
    pub hoist_clear: f32,
    /// Trolley travel the sequence returns the trolley to before descending.
    pub trolley_home: f32,

    /// Outward trolley travel limit (jib tip side).
    pub max_trolley_travel: f32,
    /// Inward trolley travel limit (tower side).
    pub min_trolley_travel: f32,
    /// Upper cable travel limit (claw near the trolley).
    pub max_cable_travel: f32,
    /// Lower cable travel limit (claw near the ground).
    pub min_cable_travel: f32,
}

impl Default for RigTuning {
    fn default() -> Self {
        Self {
            rotation_speed: PI / 4.0,
            horizontal_speed: 5.0,
            vertical_speed: 5.0,
            claw_speed: 0.5,
            max_claw_angle: PI / 1.3,
            min_claw_angle: -PI / 4.0,
            deposit_offset: -0.4,
            hoist_clear: -5.0,
            trolley_home: -0.2,
            max_trolley_travel: config::FRONT_JIB_LENGTH
                - config::TROLLEY_HOME_X
                - config::TROLLEY_WIDTH,
            min_trolley_travel: -config::TROLLEY_HOME_X
                + config::TROLLEY_WIDTH
                + config::TOWER_WIDTH,
            max_cable_travel: config::HOOK_HEIGHT * 5.0,
            min_cable_travel: -config::TOWER_HEIGHT
                + config::BASE_HEIGHT
                + config::HOOK_HEIGHT
                + config::TROLLEY_HEIGHT
                + 3.0,
        }
    }
}

/// Loads the tuning resource, applying the `GANTRY_TUNING` JSON override if
/// set. A missing or malformed file logs a warning and keeps the defaults;
/// a bad override must never prevent the scene from starting.
pub fn load_tuning() -> RigTuning {
    let Ok(path) = std::env::var(TUNING_ENV_VAR) else {
        return RigTuning::default();
    };

    match fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<RigTuning>(&text).map_err(|e| e.to_string()))
    {
        Ok(tuning) => {
            info!("loaded rig tuning from {path}");
            tuning
        }
        Err(err) => {
            warn!("ignoring rig tuning file {path}: {err}");
            RigTuning::default()
        }
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct TuningPlugin;

impl Plugin for TuningPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_tuning());
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_are_ordered() {
        let t = RigTuning::default();
        assert!(t.min_trolley_travel < t.trolley_home);
        assert!(t.trolley_home < t.max_trolley_travel);
        assert!(t.min_cable_travel < t.hoist_clear);
        assert!(t.hoist_clear < t.max_cable_travel);
        assert!(t.min_claw_angle < 0.0);
        assert!(t.max_claw_angle > 0.0);
    }

    #[test]
    fn test_default_speeds_positive() {
        let t = RigTuning::default();
        assert!(t.rotation_speed > 0.0);
        assert!(t.horizontal_speed > 0.0);
        assert!(t.vertical_speed > 0.0);
        assert!(t.claw_speed > 0.0);
    }

    #[test]
    fn test_partial_json_override_keeps_other_defaults() {
        let tuning: RigTuning =
            serde_json::from_str(r#"{ "claw_speed": 1.25, "deposit_offset": -0.8 }"#).unwrap();
        assert!((tuning.claw_speed - 1.25).abs() < f32::EPSILON);
        assert!((tuning.deposit_offset - -0.8).abs() < f32::EPSILON);
        assert_eq!(tuning.vertical_speed, RigTuning::default().vertical_speed);
        assert_eq!(tuning.hoist_clear, RigTuning::default().hoist_clear);
    }

    #[test]
    fn test_roundtrip_through_json() {
        let tuning = RigTuning::default();
        let text = serde_json::to_string(&tuning).unwrap();
        let back: RigTuning = serde_json::from_str(&text).unwrap();
        assert_eq!(tuning, back);
    }
}
