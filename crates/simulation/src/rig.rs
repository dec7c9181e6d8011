//! The crane's kinematic chain and its authoritative state.
//!
//! The rig is four linked frames: tower (fixed), jib assembly (slews about
//! the tower's vertical axis), trolley (rides along the jib), and claw
//! (hangs beneath the trolley, four hinged fingers). All animation state is
//! held in the [`RigState`] resource; `Sync`-phase systems mirror it into the
//! frames' `Transform`s each frame. Nothing downstream of this module writes
//! transforms of rig frames directly.

use bevy::prelude::*;

use crate::config;
use crate::RigUpdateSet;

// =============================================================================
// State
// =============================================================================

/// Authoritative pose of the rig, as displacements from the spawn pose.
///
/// Both free movement and the pick-and-place sequencer mutate this resource;
/// the sphere-of-influence split means they can never fight over a
/// `Transform`, only over these four scalars, and the sequencer's `animating`
/// gate makes even that exclusive.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct RigState {
    /// Jib assembly rotation about the tower's vertical axis, radians.
    pub crane_angle: f32,
    /// Trolley displacement along the jib from its spawn position.
    pub trolley_travel: f32,
    /// Claw vertical displacement from its spawn height (positive is up).
    pub cable_travel: f32,
    /// Finger hinge angle; 0 is fully open at rest.
    pub claw_angle: f32,
}

// =============================================================================
// Frame markers
// =============================================================================

/// Marker for the jib assembly frame (slews about the tower axis).
#[derive(Component)]
pub struct RigJib;

/// Marker for the trolley frame.
#[derive(Component)]
pub struct RigTrolley {
    /// Spawn x position along the jib; `trolley_travel` is relative to this.
    pub home_x: f32,
}

/// Marker for the claw frame.
#[derive(Component)]
pub struct RigClaw {
    /// Spawn height below the trolley; `cable_travel` is relative to this.
    pub home_y: f32,
}

/// Mounting quadrant of a claw finger, looking down at the claw.
///
/// The hinge axes are mirrored across the quadrants so that a single shared
/// `claw_angle` closes all four fingers symmetrically toward the claw's
/// center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerQuadrant {
    /// -x, +z
    WestFront,
    /// +x, +z
    EastFront,
    /// +x, -z
    EastBack,
    /// -x, -z
    WestBack,
}

impl FingerQuadrant {
    pub const ALL: [Self; 4] = [
        Self::WestFront,
        Self::EastFront,
        Self::EastBack,
        Self::WestBack,
    ];

    /// Unit hinge axis for this quadrant, in the claw frame.
    pub fn hinge_axis(self) -> Vec3 {
        match self {
            Self::WestFront => Vec3::new(-1.0, 0.0, -1.0),
            Self::EastFront => Vec3::new(1.0, 0.0, -1.0),
            Self::EastBack => Vec3::new(1.0, 0.0, 1.0),
            Self::WestBack => Vec3::new(-1.0, 0.0, 1.0),
        }
        .normalize()
    }

    /// Sign applied to `claw_angle` about [`Self::hinge_axis`] when closing.
    pub fn closing_sign(self) -> f32 {
        match self {
            Self::WestFront | Self::EastBack => -1.0,
            Self::EastFront | Self::WestBack => 1.0,
        }
    }

    /// Finger mount position in the claw frame.
    pub fn mount_offset(self) -> Vec3 {
        let r = config::CLAW_BODY_SIZE / 2.0 + config::CLAW_TIP_SIZE / 2.0;
        let y = -config::CLAW_BODY_HEIGHT / 3.0;
        match self {
            Self::WestFront => Vec3::new(-r, y, r),
            Self::EastFront => Vec3::new(r, y, r),
            Self::EastBack => Vec3::new(r, y, -r),
            Self::WestBack => Vec3::new(-r, y, -r),
        }
    }

    /// Local rotation of the finger at the given shared claw angle.
    pub fn finger_rotation(self, claw_angle: f32) -> Quat {
        Quat::from_axis_angle(self.hinge_axis(), self.closing_sign() * claw_angle)
    }
}

/// Marker for one of the four hinged fingers, children of the claw frame.
#[derive(Component)]
pub struct ClawFinger {
    pub quadrant: FingerQuadrant,
}

// =============================================================================
// Spawning
// =============================================================================

/// Entities of the spawned kinematic chain.
pub struct RigFrames {
    pub root: Entity,
    pub jib: Entity,
    pub trolley: Entity,
    pub claw: Entity,
    pub fingers: [Entity; 4],
}

/// Spawns the bare kinematic chain (frames and markers, no meshes) rooted at
/// `base`. The rendering layer dresses these frames with meshes; the headless
/// test harness uses them as-is. Child transforms are parent-relative, so
/// slewing the jib carries the trolley, claw, and any attached cargo with it.
pub fn spawn_rig_frames(commands: &mut Commands, base: Vec3) -> RigFrames {
    let root = commands
        .spawn((
            Transform::from_translation(base + Vec3::Y * (config::BASE_HEIGHT / 2.0)),
            Visibility::default(),
        ))
        .id();

    let jib = commands
        .spawn((
            RigJib,
            Transform::from_xyz(
                0.0,
                config::TOWER_HEIGHT + config::BASE_HEIGHT - config::AXIS_HEIGHT,
                0.0,
            ),
            Visibility::default(),
        ))
        .id();

    let trolley = commands
        .spawn((
            RigTrolley {
                home_x: config::TROLLEY_HOME_X,
            },
            Transform::from_xyz(
                config::TROLLEY_HOME_X,
                config::AXIS_HEIGHT - config::TROLLEY_HEIGHT + 0.3,
                0.0,
            ),
            Visibility::default(),
        ))
        .id();

    let claw = commands
        .spawn((
            RigClaw {
                home_y: -config::CABLE_REST_LENGTH,
            },
            Transform::from_xyz(0.0, -config::CABLE_REST_LENGTH, 0.0),
            Visibility::default(),
        ))
        .id();

    let fingers = FingerQuadrant::ALL.map(|quadrant| {
        commands
            .spawn((
                ClawFinger { quadrant },
                Transform::from_translation(quadrant.mount_offset()),
                Visibility::default(),
            ))
            .id()
    });

    commands.entity(root).add_child(jib);
    commands.entity(jib).add_child(trolley);
    commands.entity(trolley).add_child(claw);
    for finger in fingers {
        commands.entity(claw).add_child(finger);
    }

    RigFrames {
        root,
        jib,
        trolley,
        claw,
        fingers,
    }
}

// =============================================================================
// Systems: state → Transform
// =============================================================================

pub fn sync_jib(state: Res<RigState>, mut query: Query<&mut Transform, With<RigJib>>) {
    for mut transform in &mut query {
        transform.rotation = Quat::from_rotation_y(state.crane_angle);
    }
}

pub fn sync_trolley(state: Res<RigState>, mut query: Query<(&RigTrolley, &mut Transform)>) {
    for (trolley, mut transform) in &mut query {
        transform.translation.x = trolley.home_x + state.trolley_travel;
    }
}

pub fn sync_claw(state: Res<RigState>, mut query: Query<(&RigClaw, &mut Transform)>) {
    for (claw, mut transform) in &mut query {
        transform.translation.y = claw.home_y + state.cable_travel;
    }
}

pub fn sync_fingers(state: Res<RigState>, mut query: Query<(&ClawFinger, &mut Transform)>) {
    for (finger, mut transform) in &mut query {
        transform.rotation = finger.quadrant.finger_rotation(state.claw_angle);
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct RigPlugin;

impl Plugin for RigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RigState>().add_systems(
            Update,
            (sync_jib, sync_trolley, sync_claw, sync_fingers).in_set(RigUpdateSet::Sync),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
