//! The pick-and-place sequencer.
//!
//! Once the proximity trigger fires, the crane runs a scripted six-phase
//! cycle: close the claw around the cargo, hoist it clear of the ground,
//! slew to the deposit offset, pull the trolley home, lower the cargo back
//! to its pickup height, and open the claw. Each phase advances one scalar
//! of [`RigState`] by `speed · dt` until a numeric threshold is reached, so
//! the cycle is frame-rate independent and guaranteed to terminate for any
//! positive speeds.
//!
//! [`step`] is pure (state in, state out); the Bevy system around it only
//! adds the clock and the release event. A single [`Phase`] enum tracks
//! progress — one value, one active phase, no way to express an
//! inconsistent combination.

use bevy::prelude::*;

use crate::app_state::crane_active;
use crate::attach::{CargoReleased, CarriedCargo};
use crate::movement::apply_free_movement;
use crate::proximity::proximity_trigger;
use crate::rig::RigState;
use crate::tuning::RigTuning;
use crate::RigUpdateSet;

// =============================================================================
// Types
// =============================================================================

/// One discrete step of the scripted cycle. Phases always run in declaration
/// order; `Idle` is both the start and the terminal state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    ClosingClaw,
    Hoisting,
    Rotating,
    LoweringCarriage,
    Descending,
    OpeningClaw,
}

/// Sequencer state. Lives for the whole session; reset to `Idle` after each
/// completed cycle.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Sequencer {
    /// True while a scripted cycle owns the rig. Free movement is ignored
    /// and the proximity trigger is suppressed while this is set.
    pub animating: bool,
    pub phase: Phase,
    /// Set once `Rotating` has swung past the deposit offset and is
    /// correcting back toward it.
    overshot: bool,
    /// Cable travel at trigger time; `Descending` returns to exactly this,
    /// so the cargo is put down at the height it was picked up from.
    home_cable_travel: f32,
}

impl Sequencer {
    /// Starts a cycle. Called by the proximity trigger on the frame a cargo
    /// comes within reach.
    pub fn begin_cycle(&mut self, cable_travel: f32) {
        self.animating = true;
        self.phase = Phase::ClosingClaw;
        self.overshot = false;
        self.home_cable_travel = cable_travel;
    }
}

// =============================================================================
// Core step
// =============================================================================

/// Advances the cycle by one frame of `dt` seconds. Returns `true` on the
/// frame the cycle completes (the caller releases the carried cargo then).
///
/// Thresholds that a later phase returns to (pickup height, trolley home,
/// open claw) are clamped so the round trip is exact; one-way thresholds
/// (full close, hoist clearance, the rotation target) are plain guarded
/// increments and may overshoot by less than one step, as the scene always
/// has.
pub fn step(seq: &mut Sequencer, rig: &mut RigState, tuning: &RigTuning, dt: f32) -> bool {
    if !seq.animating {
        return false;
    }

    match seq.phase {
        Phase::Idle => {}

        Phase::ClosingClaw => {
            if rig.claw_angle < tuning.max_claw_angle {
                rig.claw_angle += tuning.claw_speed * dt;
            } else {
                seq.phase = Phase::Hoisting;
            }
        }

        Phase::Hoisting => {
            if rig.cable_travel < tuning.hoist_clear {
                rig.cable_travel += tuning.vertical_speed * dt;
            } else {
                seq.phase = Phase::Rotating;
            }
        }

        Phase::Rotating => {
            // Swing toward the deposit offset, overshoot past it, then
            // correct back; the phase settles on the first frame at or
            // above the target again.
            if !seq.overshot && rig.crane_angle > tuning.deposit_offset {
                rig.crane_angle -= tuning.rotation_speed * dt;
            } else if rig.crane_angle < tuning.deposit_offset {
                rig.crane_angle += tuning.rotation_speed * dt;
                seq.overshot = true;
            } else {
                seq.phase = Phase::LoweringCarriage;
            }
        }

        Phase::LoweringCarriage => {
            if rig.trolley_travel < tuning.trolley_home {
                rig.trolley_travel =
                    (rig.trolley_travel + tuning.horizontal_speed * dt).min(tuning.trolley_home);
            } else {
                seq.phase = Phase::Descending;
            }
        }

        Phase::Descending => {
            if rig.cable_travel > seq.home_cable_travel {
                rig.cable_travel =
                    (rig.cable_travel - tuning.vertical_speed * dt).max(seq.home_cable_travel);
            } else {
                seq.phase = Phase::OpeningClaw;
            }
        }

        Phase::OpeningClaw => {
            if rig.claw_angle > 0.0 {
                rig.claw_angle = (rig.claw_angle - tuning.claw_speed * dt).max(0.0);
            } else {
                seq.phase = Phase::Idle;
                seq.animating = false;
                seq.overshot = false;
                return true;
            }
        }
    }

    false
}

// =============================================================================
// System
// =============================================================================

/// Runs the sequencer once per frame and releases the carried cargo on the
/// frame the cycle completes.
pub fn run_sequencer(
    time: Res<Time>,
    tuning: Res<RigTuning>,
    carried: Res<CarriedCargo>,
    mut seq: ResMut<Sequencer>,
    mut rig: ResMut<RigState>,
    mut releases: EventWriter<CargoReleased>,
) {
    if step(&mut seq, &mut rig, &tuning, time.delta_secs()) {
        if let Some(cargo) = carried.0 {
            releases.send(CargoReleased { cargo });
        }
        info!("pick-and-place cycle complete");
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct SequencerPlugin;

impl Plugin for SequencerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Sequencer>().add_systems(
            Update,
            // Free movement first, then the trigger, then the cycle: a
            // trigger frame must not also apply user movement deltas.
            (apply_free_movement, proximity_trigger, run_sequencer)
                .chain()
                .in_set(RigUpdateSet::Drive)
                .run_if(crane_active),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    /// A rig as the trigger typically finds it: claw open, cable lowered to
    /// a cargo on the ground, everything else at the spawn pose.
    fn lowered_rig() -> RigState {
        RigState {
            cable_travel: -20.0,
            ..Default::default()
        }
    }

    fn started(rig: &RigState) -> Sequencer {
        let mut seq = Sequencer::default();
        seq.begin_cycle(rig.cable_travel);
        seq
    }

    /// Steps until the cycle completes, panicking if it never does.
    fn run_to_completion(seq: &mut Sequencer, rig: &mut RigState, tuning: &RigTuning) -> Vec<Phase> {
        let mut phases = vec![seq.phase];
        for _ in 0..1_000_000 {
            let done = step(seq, rig, tuning, DT);
            if *phases.last().unwrap() != seq.phase {
                phases.push(seq.phase);
            }
            if done {
                return phases;
            }
        }
        panic!("sequencer did not terminate");
    }

    #[test]
    fn test_idle_step_is_a_no_op() {
        let mut seq = Sequencer::default();
        let mut rig = lowered_rig();
        let before = rig;
        assert!(!step(&mut seq, &mut rig, &RigTuning::default(), DT));
        assert_eq!(rig, before);
        assert!(!seq.animating);
    }

    #[test]
    fn test_cycle_terminates() {
        let tuning = RigTuning::default();
        let mut rig = lowered_rig();
        let mut seq = started(&rig);
        run_to_completion(&mut seq, &mut rig, &tuning);
        assert!(!seq.animating);
        assert_eq!(seq.phase, Phase::Idle);
    }

    #[test]
    fn test_phase_order_is_fixed() {
        let tuning = RigTuning::default();
        let mut rig = lowered_rig();
        let mut seq = started(&rig);
        let phases = run_to_completion(&mut seq, &mut rig, &tuning);
        assert_eq!(
            phases,
            vec![
                Phase::ClosingClaw,
                Phase::Hoisting,
                Phase::Rotating,
                Phase::LoweringCarriage,
                Phase::Descending,
                Phase::OpeningClaw,
                Phase::Idle,
            ]
        );
    }

    #[test]
    fn test_phase_order_with_varied_dt() {
        // Frame-rate independence: the same phase order regardless of dt.
        let tuning = RigTuning::default();
        for dt in [1.0 / 240.0, 1.0 / 30.0, 0.1] {
            let mut rig = lowered_rig();
            let mut seq = started(&rig);
            let mut phases = vec![seq.phase];
            for _ in 0..1_000_000 {
                let done = step(&mut seq, &mut rig, &tuning, dt);
                if *phases.last().unwrap() != seq.phase {
                    phases.push(seq.phase);
                }
                if done {
                    break;
                }
            }
            assert_eq!(phases.len(), 7, "dt {dt}: {phases:?}");
            assert_eq!(*phases.last().unwrap(), Phase::Idle);
        }
    }

    #[test]
    fn test_claw_angle_monotonic_per_phase() {
        let tuning = RigTuning::default();
        let mut rig = lowered_rig();
        let mut seq = started(&rig);
        let mut prev = rig.claw_angle;
        for _ in 0..1_000_000 {
            let phase = seq.phase;
            let done = step(&mut seq, &mut rig, &tuning, DT);
            match phase {
                Phase::ClosingClaw => assert!(rig.claw_angle >= prev),
                Phase::OpeningClaw => assert!(rig.claw_angle <= prev),
                _ => assert_eq!(rig.claw_angle, prev),
            }
            prev = rig.claw_angle;
            if done {
                break;
            }
        }
        assert_eq!(rig.claw_angle, 0.0, "claw must end fully open");
    }

    #[test]
    fn test_vertical_travel_round_trips() {
        let tuning = RigTuning::default();
        for pickup in [-23.0, -12.5, -20.0] {
            let mut rig = RigState {
                cable_travel: pickup,
                ..Default::default()
            };
            let mut seq = started(&rig);
            run_to_completion(&mut seq, &mut rig, &tuning);
            assert_eq!(rig.cable_travel, pickup);
        }
    }

    #[test]
    fn test_hoisting_skipped_when_already_clear() {
        // Cargo grabbed above the clearance height: the hoist guard is
        // already satisfied and the phase passes through without moving.
        let tuning = RigTuning::default();
        let mut rig = RigState {
            cable_travel: -2.0,
            ..Default::default()
        };
        let mut seq = started(&rig);
        let mut max_travel = rig.cable_travel;
        for _ in 0..1_000_000 {
            let done = step(&mut seq, &mut rig, &tuning, DT);
            max_travel = max_travel.max(rig.cable_travel);
            if done {
                break;
            }
        }
        assert_eq!(max_travel, -2.0);
        assert_eq!(rig.cable_travel, -2.0);
    }

    #[test]
    fn test_rotation_settles_at_deposit_offset() {
        let tuning = RigTuning::default();
        let mut rig = lowered_rig();
        let mut seq = started(&rig);
        run_to_completion(&mut seq, &mut rig, &tuning);
        // Overshoot-correct: final angle is at or above the target, within
        // one correction step of it.
        assert!(rig.crane_angle >= tuning.deposit_offset);
        assert!(rig.crane_angle < tuning.deposit_offset + tuning.rotation_speed * DT);
    }

    #[test]
    fn test_rotation_from_below_target_corrects_upward() {
        // The user had already slewed past the deposit offset before the
        // trigger fired; the phase must rotate back up to it.
        let tuning = RigTuning::default();
        let mut rig = RigState {
            crane_angle: -1.2,
            cable_travel: -20.0,
            ..Default::default()
        };
        let mut seq = started(&rig);
        run_to_completion(&mut seq, &mut rig, &tuning);
        assert!(rig.crane_angle >= tuning.deposit_offset);
        assert!(rig.crane_angle < tuning.deposit_offset + tuning.rotation_speed * DT);
    }

    #[test]
    fn test_trolley_returns_to_home_threshold() {
        let tuning = RigTuning::default();
        let mut rig = RigState {
            trolley_travel: -10.0,
            cable_travel: -20.0,
            ..Default::default()
        };
        let mut seq = started(&rig);
        run_to_completion(&mut seq, &mut rig, &tuning);
        assert_eq!(rig.trolley_travel, tuning.trolley_home);
    }

    #[test]
    fn test_trolley_untouched_when_already_home() {
        let tuning = RigTuning::default();
        let mut rig = lowered_rig();
        let mut seq = started(&rig);
        run_to_completion(&mut seq, &mut rig, &tuning);
        assert_eq!(rig.trolley_travel, 0.0);
    }

    #[test]
    fn test_no_phase_revisited_within_a_cycle() {
        let tuning = RigTuning::default();
        let mut rig = lowered_rig();
        let mut seq = started(&rig);
        let phases = run_to_completion(&mut seq, &mut rig, &tuning);
        let mut seen = phases.clone();
        seen.dedup();
        assert_eq!(seen, phases, "a phase was re-entered: {phases:?}");
    }
}
