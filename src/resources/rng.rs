//! Injected randomness.
//!
//! Spawning and drift draw from this resource instead of a global generator
//! so a seed reproduces a whole run.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug)]
pub struct RandomSource(pub fastrand::Rng);

impl RandomSource {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}
