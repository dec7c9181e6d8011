//! Carousel lighting rig and the shading-mode switch.
//!
//! Four independent light groups (directional sun, ambient, a ring of point
//! lights under the strip, one spotlight per seat) toggle on their bound
//! keys. The shading keys swap every tagged body between four material
//! treatments; the materials are mutated in place, one handle per body.

use bevy::prelude::*;

use simulation::keyboard::KeyBindings;

/// Ambient brightness while the ambient group is on.
pub const AMBIENT_BRIGHTNESS: f32 = 150.0;

/// The carousel's directional light.
#[derive(Component)]
pub struct CarouselSun;

/// One of the point lights ringing the top of the central cylinder.
#[derive(Component)]
pub struct CarouselPointLight;

/// A spotlight mounted above a seat.
#[derive(Component)]
pub struct SeatSpotlight;

/// A body whose material follows the active shading mode.
#[derive(Component)]
pub struct ShadedBody {
    pub base: Color,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    #[default]
    Diffuse,
    Glossy,
    /// Tints each body by its outward direction from the carousel axis.
    NormalTint,
    Unlit,
}

fn flip(visibility: &mut Visibility) {
    *visibility = match *visibility {
        Visibility::Hidden => Visibility::Inherited,
        _ => Visibility::Hidden,
    };
}

/// Toggles the four light groups on their bound keys.
pub fn toggle_lights(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut ambient: ResMut<AmbientLight>,
    mut sun: Query<&mut Visibility, With<CarouselSun>>,
    mut points: Query<&mut Visibility, (With<CarouselPointLight>, Without<CarouselSun>)>,
    mut spots: Query<
        &mut Visibility,
        (
            With<SeatSpotlight>,
            Without<CarouselSun>,
            Without<CarouselPointLight>,
        ),
    >,
) {
    if keys.just_pressed(bindings.toggle_directional) {
        for mut visibility in &mut sun {
            flip(&mut visibility);
        }
    }
    if keys.just_pressed(bindings.toggle_point_lights) {
        for mut visibility in &mut points {
            flip(&mut visibility);
        }
    }
    if keys.just_pressed(bindings.toggle_spotlights) {
        for mut visibility in &mut spots {
            flip(&mut visibility);
        }
    }
    if keys.just_pressed(bindings.toggle_ambient) {
        ambient.brightness = if ambient.brightness > 0.0 {
            0.0
        } else {
            AMBIENT_BRIGHTNESS
        };
    }
}

/// Picks the shading mode from its bound key.
pub fn select_shading(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut mode: ResMut<ShadingMode>,
) {
    let picked = if keys.just_pressed(bindings.shading_diffuse) {
        ShadingMode::Diffuse
    } else if keys.just_pressed(bindings.shading_glossy) {
        ShadingMode::Glossy
    } else if keys.just_pressed(bindings.shading_normal) {
        ShadingMode::NormalTint
    } else if keys.just_pressed(bindings.shading_unlit) {
        ShadingMode::Unlit
    } else {
        return;
    };
    if *mode != picked {
        *mode = picked;
        info!("shading mode: {picked:?}");
    }
}

/// Rewrites every tagged body's material for the active shading mode. Only
/// runs on mode changes (including the initial frame).
pub fn apply_shading(
    mode: Res<ShadingMode>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    bodies: Query<(&ShadedBody, &GlobalTransform, &MeshMaterial3d<StandardMaterial>)>,
) {
    if !mode.is_changed() {
        return;
    }
    for (body, transform, handle) in &bodies {
        let Some(material) = materials.get_mut(handle.id()) else {
            continue;
        };
        material.base_color = body.base;
        material.perceptual_roughness = 0.9;
        material.metallic = 0.0;
        material.unlit = false;
        match *mode {
            ShadingMode::Diffuse => {}
            ShadingMode::Glossy => {
                material.perceptual_roughness = 0.15;
                material.metallic = 0.7;
            }
            ShadingMode::NormalTint => {
                let dir = transform
                    .translation()
                    .try_normalize()
                    .unwrap_or(Vec3::Y);
                material.base_color =
                    Color::srgb(dir.x * 0.5 + 0.5, dir.y * 0.5 + 0.5, dir.z * 0.5 + 0.5);
            }
            ShadingMode::Unlit => material.unlit = true,
        }
    }
}
