//! The crane scene's fixed camera bank.
//!
//! Six cameras are spawned up front and exactly one is active at a time;
//! the numeric keys switch which. Three orthographic elevations, a fixed
//! orthographic isometric, a fixed perspective, and a perspective camera
//! riding the claw frame and looking straight down at whatever it is about
//! to grab.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use simulation::keyboard::KeyBindings;
use simulation::rig::RigClaw;

/// World-units height of the orthographic viewports; wide enough to frame
/// the whole crane with some floor around it.
const ORTHO_VIEW_HEIGHT: f32 = 90.0;

/// Point the fixed cameras look at, roughly mid-tower.
const FOCUS: Vec3 = Vec3::new(0.0, 17.0, 0.0);

/// Index of the camera active at startup (the fixed perspective).
pub const DEFAULT_CAMERA: usize = 4;

#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraSelection {
    pub index: usize,
}

impl Default for CameraSelection {
    fn default() -> Self {
        Self {
            index: DEFAULT_CAMERA,
        }
    }
}

/// One of the switchable cameras, tagged with its selection index.
#[derive(Component)]
pub struct SceneCamera {
    pub index: usize,
}

fn orthographic() -> Projection {
    Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::FixedVertical {
            viewport_height: ORTHO_VIEW_HEIGHT,
        },
        ..OrthographicProjection::default_3d()
    })
}

/// Spawns the camera bank. Runs after the crane scene so the claw frame
/// exists for the mounted camera.
pub fn spawn_crane_cameras(
    mut commands: Commands,
    selection: Res<CameraSelection>,
    claw: Query<Entity, With<RigClaw>>,
) {

    let fixed: [(Transform, Projection); 5] = [
        // Front elevation, looking down -Z.
        (
            Transform::from_translation(FOCUS + Vec3::Z * 80.0).looking_at(FOCUS, Vec3::Y),
            orthographic(),
        ),
        // Side elevation, looking down -X.
        (
            Transform::from_translation(FOCUS + Vec3::X * 80.0).looking_at(FOCUS, Vec3::Y),
            orthographic(),
        ),
        // Plan view, straight down.
        (
            Transform::from_xyz(0.0, 90.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
            orthographic(),
        ),
        // Fixed isometric.
        (
            Transform::from_xyz(60.0, 60.0, 60.0).looking_at(FOCUS, Vec3::Y),
            orthographic(),
        ),
        // Fixed perspective.
        (
            Transform::from_xyz(55.0, 45.0, 55.0).looking_at(FOCUS, Vec3::Y),
            Projection::Perspective(PerspectiveProjection::default()),
        ),
    ];

    for (index, (transform, projection)) in fixed.into_iter().enumerate() {
        commands.spawn((
            SceneCamera { index },
            Camera3d::default(),
            Camera {
                is_active: index == selection.index,
                ..default()
            },
            projection,
            transform,
        ));
    }

    // Claw-mounted camera, child of the claw frame, looking down past the
    // fingers. Jib in +X when unrotated, so +X is "up" on screen.
    if let Ok(claw_entity) = claw.get_single() {
        let mounted = commands
            .spawn((
                SceneCamera { index: 5 },
                Camera3d::default(),
                Camera {
                    is_active: selection.index == 5,
                    ..default()
                },
                Projection::Perspective(PerspectiveProjection::default()),
                Transform::from_xyz(0.0, -1.0, 0.0).looking_to(Dir3::NEG_Y, Dir3::X),
            ))
            .id();
        commands.entity(claw_entity).add_child(mounted);
    }
}

/// Numeric keys activate the matching camera and deactivate the rest.
pub fn switch_active_camera(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut selection: ResMut<CameraSelection>,
    mut cameras: Query<(&SceneCamera, &mut Camera)>,
) {
    let Some(picked) = bindings
        .cameras
        .iter()
        .position(|&key| keys.just_pressed(key))
    else {
        return;
    };

    selection.index = picked;
    for (scene_camera, mut camera) in &mut cameras {
        camera.is_active = scene_camera.index == picked;
    }
}
