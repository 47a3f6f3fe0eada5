use bevy_ecs::prelude::Component;

/// Rotation angle in degrees, kept in `[0, 360)`, and its speed in degrees per tick.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
    pub speed: f32,
}
