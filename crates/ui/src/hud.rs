//! Heads-up display: the key map for the active scene, with active entries
//! highlighted. Read-only over simulation state.

use bevy::pbr::wireframe::WireframeConfig;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::camera::CameraSelection;
use rendering::lights::ShadingMode;
use simulation::carousel::CarouselState;
use simulation::keyboard::KeyBindings;
use simulation::movement::MovementIntent;
use simulation::sequencer::Sequencer;

const ACTIVE: egui::Color32 = egui::Color32::from_rgb(255, 90, 70);
const IDLE: egui::Color32 = egui::Color32::from_gray(230);

/// "KeyQ" -> "Q", "Digit3" -> "3".
fn key_label(key: KeyCode) -> String {
    let name = format!("{key:?}");
    name.trim_start_matches("Key")
        .trim_start_matches("Digit")
        .to_string()
}

fn entry(ui: &mut egui::Ui, key: KeyCode, label: &str, active: bool) {
    let color = if active { ACTIVE } else { IDLE };
    ui.colored_label(color, format!("{}  {label}", key_label(key)));
}

pub fn crane_hud_ui(
    mut contexts: EguiContexts,
    bindings: Res<KeyBindings>,
    selection: Res<CameraSelection>,
    intent: Res<MovementIntent>,
    sequencer: Res<Sequencer>,
    wireframe: Res<WireframeConfig>,
) {
    egui::Window::new("Controls")
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 2.0;

            ui.heading("Cameras");
            for (index, &key) in bindings.cameras.iter().enumerate() {
                entry(
                    ui,
                    key,
                    ["front", "side", "top", "isometric", "perspective", "claw"][index],
                    selection.index == index,
                );
            }
            entry(ui, bindings.wireframe, "wireframe", wireframe.global);

            ui.add_space(6.0);
            ui.heading("Movement");
            entry(ui, bindings.rotate_positive, "rotate +", intent.rotate_positive);
            entry(ui, bindings.rotate_negative, "rotate -", intent.rotate_negative);
            entry(ui, bindings.trolley_out, "trolley out", intent.trolley_out);
            entry(ui, bindings.trolley_in, "trolley in", intent.trolley_in);
            entry(ui, bindings.cable_up, "cable up", intent.cable_up);
            entry(ui, bindings.cable_down, "cable down", intent.cable_down);
            entry(ui, bindings.claw_open, "claw open", intent.claw_open);
            entry(ui, bindings.claw_close, "claw close", intent.claw_close);

            if sequencer.animating {
                ui.add_space(6.0);
                ui.colored_label(ACTIVE, format!("auto cycle: {:?}", sequencer.phase));
            }
        });
}

pub fn carousel_hud_ui(
    mut contexts: EguiContexts,
    bindings: Res<KeyBindings>,
    state: Res<CarouselState>,
    shading: Res<ShadingMode>,
) {
    egui::Window::new("Controls")
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 2.0;

            ui.heading("Rings");
            for (tier, &key) in bindings.ring_toggles.iter().enumerate() {
                entry(
                    ui,
                    key,
                    ["inner ring", "middle ring", "outer ring"][tier],
                    state.rings[tier].enabled,
                );
            }

            ui.add_space(6.0);
            ui.heading("Lights");
            entry(ui, bindings.toggle_directional, "directional", false);
            entry(ui, bindings.toggle_ambient, "ambient", false);
            entry(ui, bindings.toggle_point_lights, "point lights", false);
            entry(ui, bindings.toggle_spotlights, "spotlights", false);

            ui.add_space(6.0);
            ui.heading("Shading");
            entry(
                ui,
                bindings.shading_diffuse,
                "diffuse",
                *shading == ShadingMode::Diffuse,
            );
            entry(
                ui,
                bindings.shading_glossy,
                "glossy",
                *shading == ShadingMode::Glossy,
            );
            entry(
                ui,
                bindings.shading_normal,
                "normal tint",
                *shading == ShadingMode::NormalTint,
            );
            entry(
                ui,
                bindings.shading_unlit,
                "unlit",
                *shading == ShadingMode::Unlit,
            );
        });
}
