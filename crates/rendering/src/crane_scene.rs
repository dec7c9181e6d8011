//! Crane scene construction: floor, container, cargo, and the meshes
//! dressing the rig's kinematic frames.
//!
//! The frames themselves (and all animation state) belong to the simulation
//! crate; this module only spawns children carrying `Mesh3d`s, so nothing
//! here is ever written by the animation systems except through the frame
//! transforms.

use std::f32::consts::PI;

use bevy::prelude::*;

use simulation::config;
use simulation::proximity::{CargoBody, CargoRegistry};
use simulation::rig::spawn_rig_frames;
use simulation::tuning::RigTuning;

use crate::cable::HoistCable;
use crate::materials::{matte, steel};
use crate::meshes;

const CRANE_YELLOW: Color = Color::srgb(0.94, 0.71, 0.05);
const STRUCTURE_GRAY: Color = Color::srgb(0.35, 0.35, 0.38);
const FLOOR_GREEN: Color = Color::srgb(0.45, 0.55, 0.40);
const CONTAINER_RED: Color = Color::srgb(0.65, 0.24, 0.18);

/// Tie cable from the tower peak down to a jib anchor: a thin cylinder
/// rotated from +Y onto the peak→anchor direction. `reach` is signed, jib
/// side positive.
fn tie_cable(peak: Vec3, length: f32, drop: f32, reach_sign: f32) -> Transform {
    let anchor = Vec3::new(
        reach_sign * (length * length - drop * drop).sqrt(),
        peak.y - drop,
        0.0,
    );
    Transform::from_translation(peak.midpoint(anchor))
        .with_rotation(Quat::from_rotation_arc(Vec3::Y, (anchor - peak).normalize()))
}

pub fn spawn_crane_scene(
    mut commands: Commands,
    tuning: Res<RigTuning>,
    mut registry: ResMut<CargoRegistry>,
    mut meshes_assets: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let yellow = materials.add(steel(CRANE_YELLOW));
    let gray = materials.add(steel(STRUCTURE_GRAY));

    // Floor and lighting.
    commands.spawn((
        Mesh3d(meshes_assets.add(Cuboid::new(140.0, 2.0, 140.0))),
        MeshMaterial3d(materials.add(matte(FLOOR_GREEN))),
        Transform::from_xyz(0.0, -1.0, 0.0),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::default().looking_to(Vec3::new(-0.4, -1.0, -0.3), Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 220.0,
    });

    // Container at the deposit site: the heading the sequencer slews to,
    // at the trolley's home reach.
    let deposit = Quat::from_rotation_y(tuning.deposit_offset)
        * Vec3::new(config::TROLLEY_HOME_X + tuning.trolley_home, 0.0, 0.0);
    let container_mat = materials.add(matte(CONTAINER_RED));
    let wall = config::CONTAINER_HEIGHT;
    commands
        .spawn((Transform::from_translation(deposit), Visibility::default()))
        .with_children(|parent| {
            let slab = meshes_assets.add(Cuboid::new(
                config::CONTAINER_LENGTH,
                0.5,
                config::CONTAINER_DEPTH,
            ));
            parent.spawn((
                Mesh3d(slab),
                MeshMaterial3d(container_mat.clone()),
                Transform::from_xyz(0.0, 0.25, 0.0),
            ));
            let long_wall =
                meshes_assets.add(Cuboid::new(config::CONTAINER_LENGTH, wall, 0.5));
            let short_wall =
                meshes_assets.add(Cuboid::new(0.5, wall, config::CONTAINER_DEPTH));
            for side in [-1.0, 1.0] {
                parent.spawn((
                    Mesh3d(long_wall.clone()),
                    MeshMaterial3d(container_mat.clone()),
                    Transform::from_xyz(0.0, wall / 2.0, side * config::CONTAINER_DEPTH / 2.0),
                ));
                parent.spawn((
                    Mesh3d(short_wall.clone()),
                    MeshMaterial3d(container_mat.clone()),
                    Transform::from_xyz(side * config::CONTAINER_LENGTH / 2.0, wall / 2.0, 0.0),
                ));
            }
        });

    // Cargo, registered in a fixed order so the trigger's first-overlap
    // policy is deterministic.
    let cargo: [(Mesh, f32, Vec3, Color); 5] = [
        (
            Cuboid::new(3.0, 3.0, 3.0).into(),
            config::CUBE_CARGO_RADIUS,
            Vec3::new(12.0, 1.5, -14.0),
            Color::srgb(0.80, 0.45, 0.12),
        ),
        (
            meshes::dodecahedron(config::DODECAHEDRON_CARGO_RADIUS),
            config::DODECAHEDRON_CARGO_RADIUS,
            Vec3::new(-18.0, 3.0, 10.0),
            Color::srgb(0.25, 0.55, 0.75),
        ),
        (
            meshes::icosahedron(config::ICOSAHEDRON_CARGO_RADIUS),
            config::ICOSAHEDRON_CARGO_RADIUS,
            Vec3::new(-8.0, 2.6, -22.0),
            Color::srgb(0.55, 0.30, 0.65),
        ),
        (
            Torus::new(1.2, config::TORUS_CARGO_RADIUS).into(),
            config::TORUS_CARGO_RADIUS,
            Vec3::new(31.0, 1.4, -6.0),
            Color::srgb(0.75, 0.20, 0.30),
        ),
        (
            meshes::torus_knot(config::TORUS_KNOT_CARGO_RADIUS, 0.45, 2, 3, 128, 12),
            config::TORUS_KNOT_CARGO_RADIUS,
            Vec3::new(-28.0, 2.0, -4.0),
            Color::srgb(0.20, 0.60, 0.45),
        ),
    ];
    for (mesh, radius, position, color) in cargo {
        let entity = commands
            .spawn((
                CargoBody { radius },
                Mesh3d(meshes_assets.add(mesh)),
                MeshMaterial3d(materials.add(matte(color))),
                Transform::from_translation(position),
            ))
            .id();
        registry.register(entity);
    }

    // The kinematic chain, then meshes dressing each frame.
    let frames = spawn_rig_frames(&mut commands, Vec3::ZERO);

    commands.entity(frames.root).with_children(|parent| {
        parent.spawn((
            Mesh3d(meshes_assets.add(Cuboid::new(
                config::BASE_WIDTH,
                config::BASE_HEIGHT,
                config::BASE_WIDTH,
            ))),
            MeshMaterial3d(gray.clone()),
            Transform::default(),
        ));
        parent.spawn((
            Mesh3d(meshes_assets.add(Cuboid::new(
                config::TOWER_WIDTH,
                config::TOWER_HEIGHT,
                config::TOWER_WIDTH,
            ))),
            MeshMaterial3d(yellow.clone()),
            Transform::from_xyz(
                0.0,
                config::BASE_HEIGHT / 2.0 + config::TOWER_HEIGHT / 2.0,
                0.0,
            ),
        ));
    });

    let beam_y = config::AXIS_HEIGHT / 2.0 + config::FRONT_JIB_HEIGHT / 2.0;
    let peak = Vec3::new(
        0.0,
        beam_y + config::FRONT_JIB_HEIGHT / 2.0 + config::TOWER_PEAK_HEIGHT,
        0.0,
    );
    commands.entity(frames.jib).with_children(|parent| {
        // Slewing axis between tower top and jib assembly.
        parent.spawn((
            Mesh3d(meshes_assets.add(Cylinder::new(1.0, config::AXIS_HEIGHT))),
            MeshMaterial3d(gray.clone()),
            Transform::from_xyz(0.0, -config::AXIS_HEIGHT / 2.0, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes_assets.add(Cuboid::new(
                config::FRONT_JIB_LENGTH,
                config::FRONT_JIB_HEIGHT,
                config::TOWER_WIDTH,
            ))),
            MeshMaterial3d(yellow.clone()),
            Transform::from_xyz(config::FRONT_JIB_LENGTH / 2.0, beam_y, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes_assets.add(Cuboid::new(
                config::COUNTER_JIB_LENGTH,
                config::COUNTER_JIB_HEIGHT,
                config::TOWER_WIDTH,
            ))),
            MeshMaterial3d(yellow.clone()),
            Transform::from_xyz(-config::COUNTER_JIB_LENGTH / 2.0, beam_y, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes_assets.add(meshes::square_pyramid(
                config::TOWER_WIDTH,
                config::TOWER_PEAK_HEIGHT,
            ))),
            MeshMaterial3d(yellow.clone()),
            Transform::from_xyz(0.0, beam_y + config::FRONT_JIB_HEIGHT / 2.0, 0.0),
        ));
        parent.spawn((
            Mesh3d(meshes_assets.add(Cuboid::new(
                config::COUNTERWEIGHT_WIDTH,
                config::COUNTERWEIGHT_HEIGHT,
                config::COUNTERWEIGHT_DEPTH,
            ))),
            MeshMaterial3d(gray.clone()),
            Transform::from_xyz(
                -config::COUNTER_JIB_LENGTH + config::COUNTERWEIGHT_WIDTH / 2.0,
                beam_y - config::COUNTER_JIB_HEIGHT / 2.0 - config::COUNTERWEIGHT_HEIGHT / 2.0,
                0.0,
            ),
        ));
        // Operator cabin, offset so it clears the tower.
        parent.spawn((
            Mesh3d(meshes_assets.add(Cuboid::new(2.0, 2.0, 2.0))),
            MeshMaterial3d(gray.clone()),
            Transform::from_xyz(1.5, 0.0, config::TOWER_WIDTH / 2.0 + 1.0),
        ));

        let drop = config::TOWER_PEAK_HEIGHT + config::FRONT_JIB_HEIGHT / 2.0;
        let tie_mat = materials.add(steel(STRUCTURE_GRAY));
        for (length, sign) in [
            (config::FRONT_TIE_LENGTH, 1.0),
            (config::COUNTER_TIE_LENGTH, -1.0),
        ] {
            parent.spawn((
                Mesh3d(meshes_assets.add(Cylinder::new(0.12, length))),
                MeshMaterial3d(tie_mat.clone()),
                tie_cable(peak, length, drop, sign),
            ));
        }
    });

    commands.entity(frames.trolley).with_children(|parent| {
        parent.spawn((
            Mesh3d(meshes_assets.add(Cuboid::new(
                config::TROLLEY_WIDTH,
                config::TROLLEY_HEIGHT,
                config::TROLLEY_WIDTH,
            ))),
            MeshMaterial3d(gray.clone()),
            Transform::default(),
        ));
        // Unit-height cylinder; the cable sync stretches it each frame.
        parent.spawn((
            HoistCable {
                rest_length: config::CABLE_REST_LENGTH,
            },
            Mesh3d(meshes_assets.add(Cylinder::new(config::HOIST_CABLE_RADIUS, 1.0))),
            MeshMaterial3d(gray.clone()),
            Transform::from_xyz(0.0, -config::CABLE_REST_LENGTH / 2.0, 0.0)
                .with_scale(Vec3::new(1.0, config::CABLE_REST_LENGTH, 1.0)),
        ));
    });

    commands.entity(frames.claw).with_children(|parent| {
        parent.spawn((
            Mesh3d(meshes_assets.add(Cylinder::new(config::HOOK_RADIUS, config::HOOK_HEIGHT))),
            MeshMaterial3d(gray.clone()),
            Transform::default(),
        ));
    });

    let body = meshes_assets.add(Cuboid::new(
        config::CLAW_BODY_SIZE,
        config::CLAW_BODY_HEIGHT,
        config::CLAW_BODY_SIZE,
    ));
    let tip = meshes_assets.add(meshes::square_pyramid(
        config::CLAW_TIP_SIZE,
        config::CLAW_TIP_HEIGHT,
    ));
    for finger in frames.fingers {
        commands.entity(finger).with_children(|parent| {
            parent.spawn((
                Mesh3d(body.clone()),
                MeshMaterial3d(gray.clone()),
                Transform::from_xyz(0.0, -config::CLAW_BODY_HEIGHT / 2.0, 0.0),
            ));
            // Pyramid flipped to point down.
            parent.spawn((
                Mesh3d(tip.clone()),
                MeshMaterial3d(gray.clone()),
                Transform::from_xyz(0.0, -config::CLAW_BODY_HEIGHT, 0.0)
                    .with_rotation(Quat::from_rotation_x(PI)),
            ));
        });
    }
}
