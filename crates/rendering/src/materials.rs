//! Shared material helpers and the global wireframe toggle.

use bevy::pbr::wireframe::WireframeConfig;
use bevy::prelude::*;

use simulation::keyboard::KeyBindings;

/// Sky color shared by both scenes.
pub const SKY: Color = Color::srgb(0.72, 0.81, 0.95);

/// A matte colored material; the workhorse of both scenes.
pub fn matte(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.9,
        ..default()
    }
}

/// A rougher metallic material for the crane's structural members.
pub fn steel(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        metallic: 0.6,
        perceptual_roughness: 0.5,
        ..default()
    }
}

/// A double-sided material for open sheets (parametric seats, the Möbius
/// strip); backface culling would punch holes in them.
pub fn sheet(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.8,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Flips global wireframe rendering on the bound key.
pub fn toggle_wireframe(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut config: ResMut<WireframeConfig>,
) {
    if keys.just_pressed(bindings.wireframe) {
        config.global = !config.global;
        info!("wireframe {}", if config.global { "on" } else { "off" });
    }
}
