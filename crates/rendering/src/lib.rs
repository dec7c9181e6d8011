use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;

use simulation::app_state::{carousel_active, crane_active};
use simulation::RigUpdateSet;

pub mod cable;
pub mod camera;
pub mod carousel_scene;
pub mod crane_scene;
pub mod lights;
pub mod materials;
pub mod meshes;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(WireframePlugin)
            .insert_resource(WireframeConfig {
                global: false,
                default_color: Color::WHITE,
            })
            .insert_resource(ClearColor(materials::SKY))
            .init_resource::<camera::CameraSelection>()
            .init_resource::<lights::ShadingMode>()
            .add_systems(
                Startup,
                (crane_scene::spawn_crane_scene, camera::spawn_crane_cameras)
                    .chain()
                    .run_if(crane_active),
            )
            .add_systems(
                Startup,
                carousel_scene::spawn_carousel_scene.run_if(carousel_active),
            )
            .add_systems(
                Update,
                (camera::switch_active_camera, materials::toggle_wireframe)
                    .in_set(RigUpdateSet::Input)
                    .run_if(crane_active),
            )
            .add_systems(
                Update,
                cable::sync_hoist_cable
                    .in_set(RigUpdateSet::Sync)
                    .run_if(crane_active),
            )
            .add_systems(
                Update,
                (lights::toggle_lights, lights::select_shading)
                    .in_set(RigUpdateSet::Input)
                    .run_if(carousel_active),
            )
            .add_systems(
                Update,
                lights::apply_shading
                    .in_set(RigUpdateSet::Sync)
                    .run_if(carousel_active),
            );
    }
}
