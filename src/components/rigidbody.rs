//! Kinematic body component.
//!
//! The [`RigidBody`] component stores a ball's velocity in pixels per tick.
//! Friction, the optional speed cap and collision response are world-wide
//! (see [`PhysicsParams`](crate::physics::PhysicsParams)), so the body itself
//! carries nothing else.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity.
///
/// Updated by the physics system and consumed by it on the next tick to move
/// [`MapPosition`](super::mapposition::MapPosition).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    /// Current velocity in pixels per tick.
    pub velocity: Vec2,
}

impl RigidBody {
    /// Create a RigidBody moving with `velocity`.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self { velocity }
    }
}
