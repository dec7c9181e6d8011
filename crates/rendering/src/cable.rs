//! The hoist cable visual.
//!
//! The cable mesh is a unit-height cylinder hung from the trolley; each
//! frame it is stretched to the current claw depth by a non-uniform Y scale
//! and recentered on its midpoint. Pure presentation — the claw's position
//! comes from `RigState`, never from this mesh.

use bevy::prelude::*;

use simulation::rig::RigState;

#[derive(Component)]
pub struct HoistCable {
    /// Cable length at `cable_travel == 0`.
    pub rest_length: f32,
}

pub fn sync_hoist_cable(
    rig: Res<RigState>,
    mut query: Query<(&HoistCable, &mut Transform)>,
) {
    for (cable, mut transform) in &mut query {
        // Never collapse to zero; a degenerate scale breaks the mesh's
        // normals when the claw is winched all the way up.
        let length = (cable.rest_length - rig.cable_travel).max(0.1);
        transform.scale.y = length;
        transform.translation.y = -length / 2.0;
    }
}
