//! Viewport size resource.
//!
//! Stores the current drawable area in pixels. Balls bounce off its edges and
//! their diameter may be derived from its width.

use bevy_ecs::prelude::Resource;

/// Current viewport size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub w: f32,
    /// Height in pixels.
    pub h: f32,
}
