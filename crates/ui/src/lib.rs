use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::app_state::{carousel_active, crane_active};

pub mod hud;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, hud::crane_hud_ui.run_if(crane_active))
            .add_systems(Update, hud::carousel_hud_ui.run_if(carousel_active));
    }
}
