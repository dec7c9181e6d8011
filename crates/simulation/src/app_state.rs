//! Scene selection.
//!
//! The binary ships two scenes; which one runs is decided once at startup
//! from the `GANTRY_SCENE` environment variable and never changes. Systems
//! belonging to one scene use [`crane_active`] / [`carousel_active`] as run
//! conditions.

use bevy::prelude::*;

/// Environment variable selecting the scene (`crane` is the default).
pub const SCENE_ENV_VAR: &str = "GANTRY_SCENE";

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ActiveScene {
    #[default]
    Crane,
    Carousel,
}

impl ActiveScene {
    pub fn from_env() -> Self {
        match std::env::var(SCENE_ENV_VAR).as_deref() {
            Ok("carousel") => Self::Carousel,
            Ok("crane") | Err(_) => Self::Crane,
            Ok(other) => {
                warn!("unknown {SCENE_ENV_VAR} value {other:?}, defaulting to crane");
                Self::Crane
            }
        }
    }
}

/// Run condition: the crane scene is active.
pub fn crane_active(scene: Res<ActiveScene>) -> bool {
    *scene == ActiveScene::Crane
}

/// Run condition: the carousel scene is active.
pub fn carousel_active(scene: Res<ActiveScene>) -> bool {
    *scene == ActiveScene::Carousel
}

pub struct AppStatePlugin;

impl Plugin for AppStatePlugin {
    fn build(&self, app: &mut App) {
        let scene = ActiveScene::from_env();
        info!("active scene: {scene:?}");
        app.insert_resource(scene);
    }
}
