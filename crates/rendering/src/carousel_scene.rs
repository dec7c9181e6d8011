//! Carousel scene construction: skydome, central cylinder, Möbius strip,
//! the three oscillating rings, and eight parametric seats scattered over
//! them with a seeded RNG so every run builds the same carousel.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use simulation::carousel::{seat_spin_axis, CarouselRing, CarouselRoot, CarouselSeat, CarouselState};
use simulation::config;

use crate::lights::{CarouselPointLight, CarouselSun, SeatSpotlight, ShadedBody, AMBIENT_BRIGHTNESS};
use crate::materials::{matte, sheet, SKY};
use crate::meshes;

const SEAT_COUNT: usize = 8;

const SEAT_COLORS: [Color; 4] = [
    Color::srgb(0.85, 0.35, 0.25),
    Color::srgb(0.30, 0.60, 0.80),
    Color::srgb(0.90, 0.75, 0.20),
    Color::srgb(0.45, 0.70, 0.35),
];

// ---------------------------------------------------------------------------
// Seat surfaces
// ---------------------------------------------------------------------------

// Each seat is one open parametric sheet, a couple of units across, sitting
// on its ring. Non-capturing, so they pass as plain fn pointers.

fn saddle(u: f32, v: f32) -> Vec3 {
    let x = (u - 0.5) * 3.0;
    let z = (v - 0.5) * 3.0;
    Vec3::new(x, (x * x - z * z) * 0.3, z)
}

fn wave(u: f32, v: f32) -> Vec3 {
    let x = (u - 0.5) * 3.0;
    let z = (v - 0.5) * 3.0;
    Vec3::new(x, (x * 2.0).sin() * 0.4, z)
}

fn dome(u: f32, v: f32) -> Vec3 {
    let theta = u * 2.0 * PI;
    let phi = v * PI / 2.0;
    1.8 * Vec3::new(
        phi.sin() * theta.cos(),
        phi.cos(),
        phi.sin() * theta.sin(),
    )
}

fn cone_shell(u: f32, v: f32) -> Vec3 {
    let theta = u * 2.0 * PI;
    let r = v * 1.6;
    Vec3::new(r * theta.cos(), (1.0 - v) * 2.0, r * theta.sin())
}

fn helicoid(u: f32, v: f32) -> Vec3 {
    let theta = u * 2.0 * PI;
    let r = (v - 0.5) * 2.5;
    Vec3::new(r * theta.cos(), u * 1.8, r * theta.sin())
}

fn funnel(u: f32, v: f32) -> Vec3 {
    let theta = u * 2.0 * PI;
    let r = 0.4 + v * 1.4;
    Vec3::new(r * theta.cos(), v * v * 2.0, r * theta.sin())
}

fn ripple(u: f32, v: f32) -> Vec3 {
    let x = (u - 0.5) * 3.0;
    let z = (v - 0.5) * 3.0;
    let r = (x * x + z * z).sqrt();
    Vec3::new(x, (r * 3.0).cos() * 0.35, z)
}

fn cylinder_shell(u: f32, v: f32) -> Vec3 {
    let theta = u * 1.5 * PI;
    Vec3::new(1.4 * theta.cos(), (v - 0.5) * 2.2, 1.4 * theta.sin())
}

const SEAT_SURFACES: [fn(f32, f32) -> Vec3; SEAT_COUNT] = [
    saddle,
    wave,
    dome,
    cone_shell,
    helicoid,
    funnel,
    ripple,
    cylinder_shell,
];

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

pub fn spawn_carousel_scene(
    mut commands: Commands,
    mut meshes_assets: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(0x0C_A0_05_E1);

    // Fixed perspective camera and the light rig.
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(70.0, 45.0, 70.0).looking_at(Vec3::new(0.0, 18.0, 0.0), Vec3::Y),
    ));
    commands.spawn((
        CarouselSun,
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::default().looking_to(Vec3::new(-0.3, -1.0, -0.5), Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
    });

    // Skydome, inside-out.
    commands.spawn((
        Mesh3d(meshes_assets.add(Sphere::new(config::SKYDOME_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: SKY,
            unlit: true,
            cull_mode: None,
            double_sided: true,
            ..default()
        })),
        Transform::default(),
    ));

    // Ground disc so the dome has a floor.
    commands.spawn((
        Mesh3d(meshes_assets.add(Cylinder::new(config::SKYDOME_RADIUS - 1.0, 0.5))),
        MeshMaterial3d(materials.add(matte(Color::srgb(0.40, 0.52, 0.38)))),
        Transform::from_xyz(0.0, -0.25, 0.0),
    ));

    let root = commands
        .spawn((CarouselRoot, Transform::default(), Visibility::default()))
        .id();

    // Central cylinder and the Möbius strip over it.
    let cylinder = commands
        .spawn((
            ShadedBody {
                base: Color::srgb(0.55, 0.40, 0.65),
            },
            Mesh3d(meshes_assets.add(Cylinder::new(
                config::CAROUSEL_CYLINDER_RADIUS,
                config::CAROUSEL_CYLINDER_HEIGHT,
            ))),
            MeshMaterial3d(materials.add(matte(Color::srgb(0.55, 0.40, 0.65)))),
            Transform::from_xyz(0.0, config::CAROUSEL_CYLINDER_HEIGHT / 2.0, 0.0),
        ))
        .id();
    let mobius = commands
        .spawn((
            ShadedBody {
                base: Color::srgb(0.90, 0.85, 0.75),
            },
            Mesh3d(meshes_assets.add(meshes::mobius(
                config::CAROUSEL_CYLINDER_RADIUS,
                3.0,
                96,
                8,
            ))),
            MeshMaterial3d(materials.add(sheet(Color::srgb(0.90, 0.85, 0.75)))),
            Transform::from_xyz(0.0, config::MOBIUS_ELEVATION, 0.0),
        ))
        .id();
    commands.entity(root).add_child(cylinder);
    commands.entity(root).add_child(mobius);

    // Point lights ringing the strip.
    for i in 0..8 {
        let theta = i as f32 / 8.0 * 2.0 * PI;
        let light = commands
            .spawn((
                CarouselPointLight,
                PointLight {
                    intensity: 40_000.0,
                    range: 30.0,
                    ..default()
                },
                Transform::from_xyz(
                    (config::CAROUSEL_CYLINDER_RADIUS + 1.5) * theta.cos(),
                    config::MOBIUS_ELEVATION - 1.5,
                    (config::CAROUSEL_CYLINDER_RADIUS + 1.5) * theta.sin(),
                ),
            ))
            .id();
        commands.entity(root).add_child(light);
    }

    // The three rings at their spawn heights; the sync system owns their Y
    // from here on.
    let ring_entities: Vec<Entity> = (0..3)
        .map(|tier| {
            let (inner, outer) = config::RING_RADII[tier];
            let color = SEAT_COLORS[tier % SEAT_COLORS.len()];
            let ring = commands
                .spawn((
                    CarouselRing { tier },
                    ShadedBody { base: color },
                    Mesh3d(meshes_assets.add(meshes::extruded_annulus(
                        inner,
                        outer,
                        config::RING_HEIGHT,
                        64,
                    ))),
                    MeshMaterial3d(materials.add(matte(color))),
                    Transform::from_xyz(0.0, CarouselState::ring_bounds(tier).1, 0.0),
                ))
                .id();
            commands.entity(root).add_child(ring);
            ring
        })
        .collect();

    // Eight seats dealt across the rings in shuffled order.
    let mut tiers: Vec<usize> = (0..SEAT_COUNT).map(|i| i % 3).collect();
    tiers.shuffle(&mut rng);

    for (i, surface) in SEAT_SURFACES.into_iter().enumerate() {
        let tier = tiers[i];
        let (inner, outer) = config::RING_RADII[tier];
        let radius = (inner + outer) / 2.0;
        let theta = i as f32 / SEAT_COUNT as f32 * 2.0 * PI;
        let color = SEAT_COLORS[i % SEAT_COLORS.len()];

        let seat = commands
            .spawn((
                CarouselSeat {
                    spin_axis: seat_spin_axis(&mut rng),
                },
                ShadedBody { base: color },
                Mesh3d(meshes_assets.add(meshes::parametric(surface, 24, 24))),
                MeshMaterial3d(materials.add(sheet(color))),
                Transform::from_xyz(
                    radius * theta.cos(),
                    config::RING_HEIGHT / 2.0 + 0.5,
                    radius * theta.sin(),
                ),
            ))
            .id();
        let spot = commands
            .spawn((
                SeatSpotlight,
                SpotLight {
                    intensity: 60_000.0,
                    range: 20.0,
                    outer_angle: 0.7,
                    ..default()
                },
                Transform::from_xyz(0.0, 5.0, 0.0).looking_to(Dir3::NEG_Y, Dir3::X),
            ))
            .id();
        commands.entity(seat).add_child(spot);
        commands.entity(ring_entities[tier]).add_child(seat);
    }
}
