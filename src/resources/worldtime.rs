use bevy_ecs::prelude::Resource;

/// Simulation clock.
///
/// `elapsed` drives drift timers; physics itself advances once per tick and
/// ignores frame deltas.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    pub elapsed: f32,
    pub frame_count: u64,
}
