//! Physics tick system.
//!
//! Snapshots every ball into a [`Body`], runs the pure [`physics::step`] over
//! the list ordered by ball id, and writes the fresh state back onto the
//! components.
use bevy_ecs::prelude::*;

use crate::components::ball::Ball;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::wander::Wander;
use crate::physics::{self, Body, Bounds, TickInput};
use crate::resources::ballsize::BallSize;
use crate::resources::gameconfig::GameConfig;
use crate::resources::pointer::PointerState;
use crate::resources::rng::RandomSource;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;

/// Advance every ball by one tick.
pub fn physics_step(
    mut query: Query<(
        &Ball,
        &mut MapPosition,
        &mut RigidBody,
        &mut Rotation,
        &mut Wander,
    )>,
    config: Res<GameConfig>,
    pointer: Res<PointerState>,
    viewport: Res<Viewport>,
    ball_size: Res<BallSize>,
    time: Res<WorldTime>,
    mut rng: ResMut<RandomSource>,
) {
    let mut balls: Vec<_> = query.iter_mut().collect();
    balls.sort_by_key(|(ball, ..)| ball.id);

    let bodies: Vec<Body> = balls
        .iter()
        .map(|(_, position, rigidbody, rotation, wander)| Body {
            position: position.pos,
            velocity: rigidbody.velocity,
            rotation: rotation.degrees,
            rotation_speed: rotation.speed,
            next_direction_change: wander.next_direction_change,
        })
        .collect();

    let input = TickInput {
        pointer: pointer.pos,
        bounds: Bounds::new(viewport.w, viewport.h, ball_size.diameter),
        now: time.elapsed,
    };
    let next = physics::step(&bodies, &input, &config.physics, &mut rng.0);

    for ((_, position, rigidbody, rotation, wander), body) in balls.iter_mut().zip(next) {
        position.pos = body.position;
        rigidbody.velocity = body.velocity;
        rotation.degrees = body.rotation;
        rotation.speed = body.rotation_speed;
        wander.next_direction_change = body.next_direction_change;
    }
    log::trace!("Physics tick {} done", time.frame_count);
}
