//! Drift timer component.
//!
//! Balls with drift enabled re-aim in a random direction when world time
//! passes [`Wander::next_direction_change`].

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Wander {
    /// World time, in seconds, of the next re-aim.
    pub next_direction_change: f32,
}
