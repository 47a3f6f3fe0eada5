//! Pure per-tick physics for the bouncing balls.
//!
//! Nothing in this module touches the ECS world, a window or the clock. Every
//! function takes plain [`Body`] values plus the inputs it needs and returns
//! fresh values, so the whole tick can be exercised headless. The ECS side
//! ([`crate::systems::physics`]) snapshots entities into bodies, calls
//! [`step`], and writes the result back.
//!
//! Units are pixels and ticks: velocities are pixels per tick and rotation
//! speeds are degrees per tick. One tick moves a body by exactly its velocity.
//!
//! Tick order for every body:
//! 1. autonomous drift (when enabled)
//! 2. pointer repulsion
//! 3. friction
//! 4. optional velocity cap
//! 5. integration
//! 6. wall collision
//! 7. rotation
//!
//! followed by one pass of pairwise collision resolution over all bodies.

use std::f32::consts::TAU;

use glam::Vec2;

/// Degrees in a full turn; rotations are kept in `[0, FULL_TURN)`.
pub const FULL_TURN: f32 = 360.0;

/// Tunable world parameters shared by every ball.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    /// Multiplier applied to velocities and rotation speeds after any collision.
    pub bounce_damping: f32,
    /// Per-tick velocity multiplier.
    pub friction: f32,
    /// Radius around the pointer inside which balls are pushed away.
    pub repulsion_distance: f32,
    /// Velocity added at zero distance from the pointer.
    pub repulsion_force: f32,
    /// Speed used for initial velocities and drift re-aiming.
    pub random_speed: f32,
    /// Upper bound, in seconds, of the wait between two drift re-aims.
    pub direction_change_interval: f32,
    /// Enables autonomous drift.
    pub drift: bool,
    /// Initial rotation speeds are drawn from `[-initial_rotation_speed, initial_rotation_speed]`.
    pub initial_rotation_speed: f32,
    /// Optional speed cap in pixels per tick.
    pub max_velocity: Option<f32>,
    /// Optional rotation speed cap in degrees per tick.
    pub max_rotation_speed: Option<f32>,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            bounce_damping: 0.8,
            friction: 0.99,
            repulsion_distance: 300.0,
            repulsion_force: 1.5,
            random_speed: 3.0,
            direction_change_interval: 1.5,
            drift: true,
            initial_rotation_speed: 4.0,
            max_velocity: None,
            max_rotation_speed: None,
        }
    }
}

/// Physical state of one ball.
///
/// `position` is the top-left corner of the ball's bounding square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees in `[0, 360)`.
    pub rotation: f32,
    /// Degrees per tick.
    pub rotation_speed: f32,
    /// World time, in seconds, of the next drift re-aim.
    pub next_direction_change: f32,
}

impl Body {
    /// A body at rest at `position`.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            next_direction_change: f32::INFINITY,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_rotation_speed(mut self, rotation_speed: f32) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }

    /// Center of the ball for a given diameter.
    pub fn center(&self, diameter: f32) -> Vec2 {
        self.position + Vec2::splat(diameter * 0.5)
    }
}

/// The box balls live in and the size of every ball.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub diameter: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32, diameter: f32) -> Self {
        Self {
            width,
            height,
            diameter,
        }
    }

    /// Largest allowed position on each axis. A viewport smaller than a ball
    /// collapses the range to zero.
    pub fn max_position(&self) -> Vec2 {
        Vec2::new(
            (self.width - self.diameter).max(0.0),
            (self.height - self.diameter).max(0.0),
        )
    }

    /// Clamp a position into the allowed range.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        position.clamp(Vec2::ZERO, self.max_position())
    }
}

/// Everything a tick reads besides the bodies themselves.
#[derive(Clone, Copy, Debug)]
pub struct TickInput {
    /// Last observed pointer position; the origin until the pointer moves.
    pub pointer: Vec2,
    pub bounds: Bounds,
    /// World time in seconds.
    pub now: f32,
}

fn symmetric(rng: &mut fastrand::Rng, range: f32) -> f32 {
    (rng.f32() - 0.5) * 2.0 * range
}

/// Create a body at a random position inside `bounds` with a random velocity,
/// rotation and rotation speed.
pub fn spawn_body(
    rng: &mut fastrand::Rng,
    bounds: Bounds,
    params: &PhysicsParams,
    now: f32,
) -> Body {
    let max = bounds.max_position();
    Body {
        position: Vec2::new(rng.f32() * max.x, rng.f32() * max.y),
        velocity: Vec2::new(
            symmetric(rng, params.random_speed),
            symmetric(rng, params.random_speed),
        ),
        rotation: wrap_degrees(rng.f32() * FULL_TURN),
        rotation_speed: symmetric(rng, params.initial_rotation_speed),
        next_direction_change: now + rng.f32() * params.direction_change_interval,
    }
}

/// Re-aim the body in a random direction once its drift timer has expired.
pub fn drift(mut body: Body, now: f32, params: &PhysicsParams, rng: &mut fastrand::Rng) -> Body {
    if !params.drift || now <= body.next_direction_change {
        return body;
    }
    let angle = rng.f32() * TAU;
    let speed = params.random_speed * (0.8 + rng.f32() * 0.4);
    body.velocity = Vec2::from_angle(angle) * speed;
    body.next_direction_change = now + rng.f32() * params.direction_change_interval;
    body
}

/// Push the body away from the pointer, linearly stronger as it gets closer.
pub fn repel(mut body: Body, pointer: Vec2, diameter: f32, params: &PhysicsParams) -> Body {
    let offset = body.center(diameter) - pointer;
    let distance = offset.length();
    if distance < params.repulsion_distance {
        let force = (params.repulsion_distance - distance) / params.repulsion_distance;
        let angle = offset.y.atan2(offset.x);
        body.velocity += Vec2::from_angle(angle) * force * params.repulsion_force;
    }
    body
}

/// Rescale `velocity` down to `max` if it is faster, keeping its direction.
pub fn clamp_speed(velocity: Vec2, max: Option<f32>) -> Vec2 {
    match max {
        Some(max) if velocity.length() > max => velocity.clamp_length_max(max),
        _ => velocity,
    }
}

/// Clamp a rotation speed to `[-max, max]`.
pub fn clamp_spin(rotation_speed: f32, max: Option<f32>) -> f32 {
    match max {
        Some(max) => rotation_speed.clamp(-max, max),
        None => rotation_speed,
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Apply friction and the speed cap, move the body by its velocity, bounce it
/// off the walls and advance its rotation.
///
/// A wall hit on either axis (or both) inverts and damps the rotation speed
/// once.
pub fn integrate(mut body: Body, bounds: Bounds, params: &PhysicsParams) -> Body {
    body.velocity = clamp_speed(body.velocity * params.friction, params.max_velocity);

    let mut position = body.position + body.velocity;
    let max = bounds.max_position();
    let mut hit_wall = false;

    if position.x < 0.0 || position.x > max.x {
        position.x = position.x.clamp(0.0, max.x);
        body.velocity.x *= -params.bounce_damping;
        hit_wall = true;
    }
    if position.y < 0.0 || position.y > max.y {
        position.y = position.y.clamp(0.0, max.y);
        body.velocity.y *= -params.bounce_damping;
        hit_wall = true;
    }
    if hit_wall {
        body.rotation_speed *= -params.bounce_damping;
    }

    body.position = position;
    body.rotation_speed = clamp_spin(body.rotation_speed, params.max_rotation_speed);
    body.rotation = wrap_degrees(body.rotation + body.rotation_speed);
    body
}

/// Resolve a collision between two balls of the same diameter.
///
/// The impulse along the collision normal is taken from `a` and given to
/// `b`, which swaps their normal velocity components. Both velocities are
/// then damped and capped.
///
/// Returns `None` when the pair does not need resolving: the balls do not
/// overlap, they are already separating, or their centers coincide so no
/// collision normal exists.
pub fn resolve_pair(
    a: &Body,
    b: &Body,
    diameter: f32,
    params: &PhysicsParams,
) -> Option<(Body, Body)> {
    let offset = a.position - b.position;
    let distance = offset.length();
    if distance >= diameter || distance == 0.0 {
        return None;
    }

    let normal = offset / distance;
    let closing_speed = (a.velocity - b.velocity).dot(normal);
    if closing_speed >= 0.0 {
        return None;
    }

    // 2 * closing / (1/m_a + 1/m_b) with unit masses
    let impulse = normal * closing_speed;
    let push = normal * ((diameter - distance) * 0.5);
    let spin_gap = (a.rotation_speed - b.rotation_speed) * 0.5;
    let damping = params.bounce_damping;

    let a_next = Body {
        position: a.position + push,
        velocity: clamp_speed((a.velocity - impulse) * damping, params.max_velocity),
        rotation_speed: clamp_spin(
            (a.rotation_speed - spin_gap) * damping,
            params.max_rotation_speed,
        ),
        ..*a
    };
    let b_next = Body {
        position: b.position - push,
        velocity: clamp_speed((b.velocity + impulse) * damping, params.max_velocity),
        rotation_speed: clamp_spin(
            (b.rotation_speed + spin_gap) * damping,
            params.max_rotation_speed,
        ),
        ..*b
    };
    Some((a_next, b_next))
}

/// Resolve every overlapping pair once, in index order, on a fresh copy of
/// `bodies`.
///
/// Resolving `(i, j)` before `(j, k)` can push `j` back into `k` within the
/// same tick; the next tick picks that up. Positions are clamped back into
/// `bounds` afterwards without touching velocities.
pub fn resolve_collisions(bodies: &[Body], bounds: Bounds, params: &PhysicsParams) -> Vec<Body> {
    let mut next = bodies.to_vec();
    for i in 0..next.len() {
        for j in (i + 1)..next.len() {
            if let Some((a, b)) = resolve_pair(&next[i], &next[j], bounds.diameter, params) {
                log::trace!("collision between balls {} and {}", i, j);
                next[i] = a;
                next[j] = b;
            }
        }
    }
    for body in next.iter_mut() {
        body.position = bounds.clamp(body.position);
    }
    next
}

/// Advance every body by one tick.
///
/// `bodies` is left untouched; the returned list is the next state, in the
/// same order.
pub fn step(
    bodies: &[Body],
    input: &TickInput,
    params: &PhysicsParams,
    rng: &mut fastrand::Rng,
) -> Vec<Body> {
    let moved: Vec<Body> = bodies
        .iter()
        .map(|body| {
            let body = drift(*body, input.now, params, rng);
            let body = repel(body, input.pointer, input.bounds.diameter, params);
            integrate(body, input.bounds, params)
        })
        .collect();
    resolve_collisions(&moved, input.bounds, params)
}
