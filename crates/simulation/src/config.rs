//! Scene dimension constants.
//!
//! Crane member sizes, cargo bounding radii, and carousel measurements.
//! These are fixed scene geometry; runtime-tunable speeds and thresholds
//! live in [`crate::tuning::RigTuning`] instead.

// ---------------------------------------------------------------------------
// Crane
// ---------------------------------------------------------------------------

pub const BASE_WIDTH: f32 = 9.0;
pub const BASE_HEIGHT: f32 = 3.0;

pub const TOWER_WIDTH: f32 = 3.0;
pub const TOWER_HEIGHT: f32 = 36.0;

/// Height of the slewing axis cylinder between the tower and the jib assembly.
pub const AXIS_HEIGHT: f32 = 1.0;

pub const FRONT_JIB_LENGTH: f32 = 45.0;
pub const FRONT_JIB_HEIGHT: f32 = 3.0;

pub const COUNTER_JIB_LENGTH: f32 = 9.0;
pub const COUNTER_JIB_HEIGHT: f32 = 3.0;

pub const TOWER_PEAK_HEIGHT: f32 = 6.0;

pub const COUNTERWEIGHT_WIDTH: f32 = 4.5;
pub const COUNTERWEIGHT_HEIGHT: f32 = 1.5;
pub const COUNTERWEIGHT_DEPTH: f32 = 2.0;

pub const TROLLEY_WIDTH: f32 = 3.0;
pub const TROLLEY_HEIGHT: f32 = 1.5;

/// Tie cable lengths from the tower peak to the jibs.
pub const FRONT_TIE_LENGTH: f32 = 35.0;
pub const COUNTER_TIE_LENGTH: f32 = 12.1;

/// Trolley spawn position along the jib, measured from the tower axis.
pub const TROLLEY_HOME_X: f32 = 27.0;
pub const HOIST_CABLE_RADIUS: f32 = 0.1;

/// Rest length of the hoist cable; the claw frame hangs this far below the
/// trolley at spawn.
pub const CABLE_REST_LENGTH: f32 = 9.0;

pub const HOOK_RADIUS: f32 = 1.5;
pub const HOOK_HEIGHT: f32 = 1.25;

pub const CLAW_BODY_SIZE: f32 = 0.5;
pub const CLAW_BODY_HEIGHT: f32 = 0.75;
pub const CLAW_TIP_SIZE: f32 = 0.5;
pub const CLAW_TIP_HEIGHT: f32 = 0.5;

/// Bounding radius of the claw assembly for the proximity trigger.
pub const CLAW_RADIUS: f32 = 1.5;

// Cargo bounding radii (spheres, deliberately coarse).
pub const CUBE_CARGO_RADIUS: f32 = 2.0;
pub const ICOSAHEDRON_CARGO_RADIUS: f32 = 3.0;
pub const DODECAHEDRON_CARGO_RADIUS: f32 = 3.5;
pub const TORUS_CARGO_RADIUS: f32 = 4.0;
pub const TORUS_KNOT_CARGO_RADIUS: f32 = 2.0;

// Container at the deposit site.
pub const CONTAINER_LENGTH: f32 = 20.0;
pub const CONTAINER_HEIGHT: f32 = 6.0;
pub const CONTAINER_DEPTH: f32 = 8.0;

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

pub const CAROUSEL_CYLINDER_RADIUS: f32 = 6.0;
pub const CAROUSEL_CYLINDER_HEIGHT: f32 = 20.0;

pub const SKYDOME_RADIUS: f32 = 95.0;
/// Height of the Möbius strip's center above the ground, just clearing the
/// central cylinder's top.
pub const MOBIUS_ELEVATION: f32 = 21.0;

pub const RING_HEIGHT: f32 = 5.0;

/// Inner/outer radii of the three concentric rings, innermost first.
pub const RING_RADII: [(f32, f32); 3] = [(6.0, 20.0), (20.0, 34.0), (34.0, 48.0)];
