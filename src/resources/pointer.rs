//! Pointer position resource.
//!
//! Written whenever the pointer moves and read once per tick by the physics
//! system. Until the first move it stays parked at the origin.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// Last observed pointer position in viewport pixels.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
}
