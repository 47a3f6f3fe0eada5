//! Render projection.
//!
//! Reads the ball entities into a [`FrameSnapshot`] ordered by ball id. The
//! snapshot is all a frontend needs to draw a frame or hit-test a click.
use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::Serialize;

use crate::components::ball::Ball;
use crate::components::mapposition::MapPosition;
use crate::components::rotation::Rotation;
use crate::resources::ballsize::BallSize;
use crate::resources::worldtime::WorldTime;

/// One ball as seen by the renderer.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BallSnapshot {
    pub id: usize,
    /// Top-left corner of the ball's bounding square.
    pub x: f32,
    pub y: f32,
    /// Degrees in `[0, 360)`.
    pub rotation: f32,
    pub image: String,
    pub url: String,
}

/// Every ball after a tick, plus the shared diameter.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub diameter: f32,
    pub balls: Vec<BallSnapshot>,
}

impl FrameSnapshot {
    /// The ball under `point`, if any. When balls overlap the one drawn last
    /// (highest id) wins.
    pub fn ball_at(&self, point: Vec2) -> Option<&BallSnapshot> {
        let radius = self.diameter * 0.5;
        self.balls.iter().rev().find(|ball| {
            let center = Vec2::new(ball.x + radius, ball.y + radius);
            center.distance_squared(point) <= radius * radius
        })
    }
}

/// Project the current world into a [`FrameSnapshot`].
pub fn snapshot(world: &mut World) -> FrameSnapshot {
    let diameter = world.resource::<BallSize>().diameter;
    let frame = world.resource::<WorldTime>().frame_count;

    let mut query = world.query::<(&Ball, &MapPosition, &Rotation)>();
    let mut balls: Vec<BallSnapshot> = query
        .iter(world)
        .map(|(ball, position, rotation)| BallSnapshot {
            id: ball.id,
            x: position.pos.x,
            y: position.pos.y,
            rotation: rotation.degrees,
            image: ball.image.clone(),
            url: ball.url.clone(),
        })
        .collect();
    balls.sort_by_key(|ball| ball.id);

    FrameSnapshot {
        frame,
        diameter,
        balls,
    }
}
