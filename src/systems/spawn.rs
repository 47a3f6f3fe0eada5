//! Ball spawning.
//!
//! Creates one entity per configured [`BallAsset`](crate::resources::gameconfig::BallAsset)
//! with a random position, velocity, rotation and drift timer. Runs once when
//! the engine is built; the set of balls never changes afterwards.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::ball::Ball;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::wander::Wander;
use crate::physics::{self, Bounds};
use crate::resources::ballsize::BallSize;
use crate::resources::gameconfig::GameConfig;
use crate::resources::rng::RandomSource;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;

/// Spawn every configured ball and return how many were created.
pub fn spawn_balls(world: &mut World) -> usize {
    let config = world.resource::<GameConfig>().clone();
    let viewport = *world.resource::<Viewport>();
    let diameter = world.resource::<BallSize>().diameter;
    let now = world.resource::<WorldTime>().elapsed;
    let bounds = Bounds::new(viewport.w, viewport.h, diameter);

    let bodies: Vec<_> = {
        let mut rng = world.resource_mut::<RandomSource>();
        config
            .balls
            .iter()
            .map(|_| physics::spawn_body(&mut rng.0, bounds, &config.physics, now))
            .collect()
    };

    for (id, (asset, body)) in config.balls.iter().zip(bodies).enumerate() {
        world.spawn((
            Ball {
                id,
                image: asset.image.clone(),
                url: asset.url.clone(),
            },
            MapPosition { pos: body.position },
            RigidBody::with_velocity(body.velocity),
            Rotation {
                degrees: body.rotation,
                speed: body.rotation_speed,
            },
            Wander {
                next_direction_change: body.next_direction_change,
            },
        ));
    }

    info!(
        "Spawned {} balls (diameter {}) in a {}x{} viewport",
        config.balls.len(),
        diameter,
        viewport.w,
        viewport.h
    );
    config.balls.len()
}
