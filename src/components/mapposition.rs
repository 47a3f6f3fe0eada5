use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Top-left corner of a ball's bounding square, in viewport pixels.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

