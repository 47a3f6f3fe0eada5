//! Bouncing Links library.
//!
//! An animated landing-page background: a handful of labeled balls bounce
//! around the viewport, flee the pointer, collide with each other and the
//! edges, and open a link when clicked. This module exposes the physics core,
//! the ECS components, resources, systems and events hosting it, and the
//! engine with its frame drivers, for use by the binary and integration tests.

pub mod components;
pub mod engine;
pub mod events;
pub mod frontend;
pub mod physics;
pub mod resources;
pub mod systems;
