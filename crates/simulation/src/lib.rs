use bevy::prelude::*;

pub mod app_state;
pub mod attach;
pub mod carousel;
pub mod config;
pub mod keyboard;
pub mod movement;
pub mod proximity;
pub mod rig;
pub mod sequencer;
pub mod test_harness;
pub mod tuning;

#[cfg(test)]
mod integration_tests;

// ---------------------------------------------------------------------------
// Update phases
// ---------------------------------------------------------------------------

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Drive` → `Sync`.
///
/// * **Input** – keyboard state is translated into intent flags and toggles.
/// * **Drive** – authoritative state advances: free movement, the proximity
///   trigger, the pick-and-place sequencer, cargo attach/detach, and the
///   carousel step. Everything here mutates logical state only.
/// * **Sync** – logical state is mirrored into scene-graph `Transform`s.
///   Systems in this set never write back into `Drive` state, so the
///   rendering layer only ever sees a consistent frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RigUpdateSet {
    /// Keyboard → intent flags and toggles.
    Input,
    /// Logical state update (movement gate, sequencer, carousel).
    Drive,
    /// Logical state → `Transform` mirroring.
    Sync,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (RigUpdateSet::Input, RigUpdateSet::Drive, RigUpdateSet::Sync).chain(),
        );

        app.add_plugins((
            app_state::AppStatePlugin,
            tuning::TuningPlugin,
            keyboard::KeyboardPlugin,
            movement::MovementPlugin,
            proximity::ProximityPlugin,
            sequencer::SequencerPlugin,
            attach::AttachPlugin,
            rig::RigPlugin,
            carousel::CarouselPlugin,
        ));
    }
}
