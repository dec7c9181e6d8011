//! End-to-end tests driving the full app through the headless harness.

mod carousel_rings;
mod movement_gate;
mod pick_and_place;
