//! Headless harness for driving the full simulation in tests.
//!
//! Builds a real Bevy [`App`] with `MinimalPlugins` plus the transform
//! plugin — no window, no renderer — and steps it with a fixed manual clock
//! so every run is deterministic. Input goes in through the same
//! `ButtonInput<KeyCode>` resource the windowed binary feeds, so the
//! keyboard layer is exercised too, not bypassed.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;

use crate::app_state::ActiveScene;
use crate::attach::CarriedCargo;
use crate::carousel::CarouselState;
use crate::proximity::{CargoBody, CargoRegistry};
use crate::rig::{spawn_rig_frames, RigFrames, RigState};
use crate::sequencer::Sequencer;
use crate::tuning::RigTuning;
use crate::SimulationPlugin;

/// Fixed frame duration for every harness tick, close to 60 fps.
pub const FRAME: Duration = Duration::from_micros(16_667);

pub struct TestRig {
    pub app: App,
    pub frames: RigFrames,
}

impl TestRig {
    /// A crane-scene harness with the kinematic chain spawned at the origin.
    pub fn new() -> Self {
        Self::build(ActiveScene::Crane)
    }

    /// A carousel-scene harness. The rig frames are still spawned, but the
    /// crane systems are inert under this scene.
    pub fn carousel() -> Self {
        Self::build(ActiveScene::Carousel)
    }

    fn build(scene: ActiveScene) -> Self {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TransformPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins(SimulationPlugin)
            .insert_resource(scene);

        let frames = {
            let mut commands = app.world_mut().commands();
            spawn_rig_frames(&mut commands, Vec3::ZERO)
        };
        app.world_mut().flush();

        let mut harness = Self { app, frames };
        // One settling frame so global transforms exist before assertions.
        harness.tick(1);
        harness
    }

    /// Runs `n` frames of [`FRAME`] each. `just_pressed` edges are cleared
    /// after every frame, as the windowed input plugin would.
    pub fn tick(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
            self.app
                .world_mut()
                .resource_mut::<ButtonInput<KeyCode>>()
                .clear();
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    /// Spawns a cargo body at a world position and registers it with the
    /// proximity trigger.
    pub fn spawn_cargo(&mut self, position: Vec3, radius: f32) -> Entity {
        let entity = self
            .app
            .world_mut()
            .spawn((
                CargoBody { radius },
                Transform::from_translation(position),
                Visibility::default(),
            ))
            .id();
        self.app
            .world_mut()
            .resource_mut::<CargoRegistry>()
            .register(entity);
        entity
    }

    // ---------------------------------------------------------------------
    // State accessors
    // ---------------------------------------------------------------------

    pub fn rig(&self) -> RigState {
        *self.app.world().resource::<RigState>()
    }

    pub fn sequencer(&self) -> Sequencer {
        *self.app.world().resource::<Sequencer>()
    }

    pub fn tuning(&self) -> RigTuning {
        self.app.world().resource::<RigTuning>().clone()
    }

    pub fn carried(&self) -> Option<Entity> {
        self.app.world().resource::<CarriedCargo>().0
    }

    pub fn carousel_state(&self) -> CarouselState {
        self.app.world().resource::<CarouselState>().clone()
    }

    pub fn world_pos(&self, entity: Entity) -> Vec3 {
        self.app
            .world()
            .get::<GlobalTransform>(entity)
            .expect("entity has no global transform")
            .translation()
    }

    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.app.world().get::<Parent>(entity).map(|p| p.get())
    }
}
