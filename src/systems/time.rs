//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Add the frame delta `dt` (seconds) to `elapsed` and count the frame.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += dt;
    wt.frame_count += 1;
}
