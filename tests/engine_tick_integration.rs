//! Engine tick integration tests for spawning, physics, resizing, clicks and
//! the running/stopped lifecycle.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;

use bouncinglinks::components::ball::Ball;
use bouncinglinks::components::mapposition::MapPosition;
use bouncinglinks::components::rigidbody::RigidBody;
use bouncinglinks::components::rotation::Rotation;
use bouncinglinks::components::wander::Wander;
use bouncinglinks::engine::{Engine, EngineState, FrameDriver, FrameInput};
use bouncinglinks::events::ballclick::BallClickedEvent;
use bouncinglinks::frontend::headless::HeadlessDriver;
use bouncinglinks::physics::{FULL_TURN, PhysicsParams};
use bouncinglinks::resources::ballsize::{BallSize, SizeRule};
use bouncinglinks::resources::gameconfig::{BallAsset, GameConfig};
use bouncinglinks::resources::pointer::PointerState;
use bouncinglinks::resources::rng::RandomSource;
use bouncinglinks::resources::viewport::Viewport;
use bouncinglinks::resources::worldtime::WorldTime;
use bouncinglinks::systems::physics::physics_step;
use bouncinglinks::systems::snapshot::FrameSnapshot;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// No friction, no drift, no pointer push, 100px balls.
fn still_config(balls: usize) -> GameConfig {
    GameConfig {
        physics: PhysicsParams {
            friction: 1.0,
            drift: false,
            repulsion_force: 0.0,
            ..PhysicsParams::default()
        },
        size: SizeRule {
            fixed: Some(100.0),
            ..SizeRule::default()
        },
        balls: (0..balls)
            .map(|i| BallAsset::new(format!("{i}.png"), format!("https://{i}.example")))
            .collect(),
        ..GameConfig::new()
    }
}

fn make_world(config: GameConfig, w: f32, h: f32) -> World {
    let mut world = World::new();
    world.insert_resource(BallSize::from_viewport_width(w, &config.size));
    world.insert_resource(config);
    world.insert_resource(Viewport { w, h });
    world.insert_resource(PointerState::default());
    world.insert_resource(WorldTime::default());
    world.insert_resource(RandomSource::with_seed(1));
    world
}

fn spawn_ball(world: &mut World, id: usize, pos: Vec2, velocity: Vec2) -> Entity {
    world
        .spawn((
            Ball {
                id,
                image: format!("{id}.png"),
                url: format!("https://{id}.example"),
            },
            MapPosition { pos },
            RigidBody::with_velocity(velocity),
            Rotation::default(),
            Wander {
                next_direction_change: f32::INFINITY,
            },
        ))
        .id()
}

fn tick_physics(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(physics_step);
    schedule.run(world);
}

/// Move ball `id` of an engine to `pos` with `velocity`.
fn place(engine: &mut Engine, id: usize, pos: Vec2, velocity: Vec2) {
    let world = engine.world_mut();
    let mut query = world.query::<(&Ball, &mut MapPosition, &mut RigidBody)>();
    for (ball, mut position, mut rigidbody) in query.iter_mut(world) {
        if ball.id == id {
            position.pos = pos;
            rigidbody.velocity = velocity;
        }
    }
}

#[test]
fn physics_step_bounces_off_left_wall() {
    let mut world = make_world(still_config(1), 500.0, 500.0);
    world.resource_mut::<PointerState>().pos = Vec2::new(10_000.0, 10_000.0);
    let entity = spawn_ball(&mut world, 0, Vec2::new(0.0, 50.0), Vec2::new(-2.0, 0.0));

    tick_physics(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    let rb = world.get::<RigidBody>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 0.0));
    assert!(approx_eq(rb.velocity.x, 1.6));
}

#[test]
fn physics_step_separates_closing_pair() {
    let mut world = make_world(still_config(2), 1000.0, 1000.0);
    world.resource_mut::<PointerState>().pos = Vec2::new(10_000.0, 10_000.0);
    // spawned out of id order; the step must still pair them by id
    let b = spawn_ball(&mut world, 1, Vec2::new(150.0, 100.0), Vec2::new(-1.0, 0.0));
    let a = spawn_ball(&mut world, 0, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));

    tick_physics(&mut world);

    let pa = world.get::<MapPosition>(a).unwrap().pos;
    let pb = world.get::<MapPosition>(b).unwrap().pos;
    assert!(pa.x < 100.0);
    assert!(pb.x > 150.0);
    assert!(pa.distance(pb) >= 100.0 - EPSILON);
    assert!(world.get::<RigidBody>(a).unwrap().velocity.x < 0.0);
    assert!(world.get::<RigidBody>(b).unwrap().velocity.x > 0.0);
}

#[test]
fn physics_step_pushes_away_from_parked_pointer() {
    let config = GameConfig {
        physics: PhysicsParams {
            friction: 1.0,
            drift: false,
            ..PhysicsParams::default()
        },
        ..still_config(1)
    };
    let mut world = make_world(config, 1000.0, 1000.0);
    // pointer never moved: parked at the origin
    let entity = spawn_ball(&mut world, 0, Vec2::new(100.0, 100.0), Vec2::ZERO);

    tick_physics(&mut world);

    let rb = world.get::<RigidBody>(entity).unwrap();
    assert!(rb.velocity.x > 0.0);
    assert!(rb.velocity.y > 0.0);
}

#[test]
fn physics_step_wraps_rotation() {
    let mut world = make_world(still_config(1), 1000.0, 1000.0);
    let entity = spawn_ball(&mut world, 0, Vec2::new(400.0, 400.0), Vec2::ZERO);
    *world.get_mut::<Rotation>(entity).unwrap() = Rotation {
        degrees: 355.0,
        speed: 10.0,
    };

    tick_physics(&mut world);

    let rotation = world.get::<Rotation>(entity).unwrap();
    assert!(approx_eq(rotation.degrees, 5.0));
}

#[test]
fn engine_spawns_one_ball_per_asset() {
    let mut engine = Engine::new(
        GameConfig::new(),
        Viewport { w: 1000.0, h: 800.0 },
        RandomSource::with_seed(3),
    );
    let frame = engine.snapshot();

    assert_eq!(frame.balls.len(), 5);
    assert_eq!(
        frame.balls.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
    assert_eq!(frame.diameter, 150.0);
    for ball in &frame.balls {
        assert!(ball.x >= 0.0 && ball.x <= 1000.0 - 150.0);
        assert!(ball.y >= 0.0 && ball.y <= 800.0 - 150.0);
    }
}

#[test]
fn engine_starts_stopped_and_ignores_ticks() {
    let mut engine = Engine::new(
        GameConfig::new(),
        Viewport { w: 1000.0, h: 800.0 },
        RandomSource::with_seed(3),
    );
    assert_eq!(engine.state(), EngineState::Stopped);
    let before = engine.snapshot();

    assert!(!engine.tick(1.0 / 60.0));

    assert_eq!(engine.snapshot(), before);
}

#[test]
fn engine_stop_halts_ticks() {
    let mut engine = Engine::new(
        GameConfig::new(),
        Viewport { w: 1000.0, h: 800.0 },
        RandomSource::with_seed(3),
    );
    engine.start();
    assert!(engine.tick(1.0 / 60.0));
    assert_eq!(engine.snapshot().frame, 1);

    engine.stop();
    assert!(!engine.tick(1.0 / 60.0));
    assert_eq!(engine.snapshot().frame, 1);
}

#[test]
fn engine_keeps_balls_inside_viewport() {
    let mut engine = Engine::new(
        GameConfig::new(),
        Viewport { w: 900.0, h: 600.0 },
        RandomSource::with_seed(11),
    );
    engine.start();
    let path = [
        Vec2::new(450.0, 300.0),
        Vec2::new(100.0, 500.0),
        Vec2::new(800.0, 50.0),
    ];

    for tick in 0..2_000 {
        let pointer = path[tick % path.len()];
        engine.set_pointer(pointer.x, pointer.y);
        engine.tick(1.0 / 60.0);
        let frame = engine.snapshot();
        let max_x = 900.0 - frame.diameter;
        let max_y = 600.0 - frame.diameter;
        for ball in &frame.balls {
            assert!(ball.x >= 0.0 && ball.x <= max_x, "x out of bounds: {}", ball.x);
            assert!(ball.y >= 0.0 && ball.y <= max_y, "y out of bounds: {}", ball.y);
            assert!(ball.rotation >= 0.0 && ball.rotation < FULL_TURN);
        }
    }
}

#[test]
fn engine_is_deterministic_for_a_seed() {
    let run = || {
        let mut engine = Engine::new(
            GameConfig::new(),
            Viewport { w: 1200.0, h: 700.0 },
            RandomSource::with_seed(99),
        );
        let mut driver = HeadlessDriver::new(120, Vec::new()).with_every(0);
        engine.run(&mut driver);
        engine.snapshot()
    };

    assert_eq!(run(), run());
}

#[test]
fn engine_resize_recomputes_clamped_diameter() {
    let mut engine = Engine::new(
        GameConfig::new(),
        Viewport {
            w: 1000.0,
            h: 1000.0,
        },
        RandomSource::with_seed(5),
    );
    assert_eq!(engine.snapshot().diameter, 150.0);

    engine.resize(2000.0, 1000.0);

    assert_eq!(engine.snapshot().diameter, 250.0);
    assert_eq!(
        *engine.world().resource::<Viewport>(),
        Viewport {
            w: 2000.0,
            h: 1000.0
        }
    );
}

#[test]
fn engine_resize_then_tick_pulls_balls_back_inside() {
    let mut engine = Engine::new(
        still_config(1),
        Viewport { w: 1000.0, h: 1000.0 },
        RandomSource::with_seed(5),
    );
    place(&mut engine, 0, Vec2::new(850.0, 850.0), Vec2::ZERO);
    engine.start();

    engine.resize(500.0, 500.0);
    engine.tick(1.0 / 60.0);

    let ball = &engine.snapshot().balls[0];
    assert!(approx_eq(ball.x, 400.0));
    assert!(approx_eq(ball.y, 400.0));
}

#[derive(Resource, Default)]
struct Clicked(Vec<usize>);

#[test]
fn engine_click_hits_ball_and_fires_event() {
    let mut engine = Engine::new(
        still_config(2),
        Viewport { w: 1000.0, h: 1000.0 },
        RandomSource::with_seed(5),
    );
    place(&mut engine, 0, Vec2::new(100.0, 100.0), Vec2::ZERO);
    place(&mut engine, 1, Vec2::new(600.0, 600.0), Vec2::ZERO);
    {
        let world = engine.world_mut();
        world.init_resource::<Clicked>();
        world.add_observer(|trigger: On<BallClickedEvent>, mut clicked: ResMut<Clicked>| {
            clicked.0.push(trigger.event().id);
        });
        world.flush();
    }

    assert_eq!(
        engine.click(650.0, 650.0).as_deref(),
        Some("https://1.example")
    );
    assert_eq!(engine.click(10.0, 900.0), None);
    assert_eq!(
        engine.click(150.0, 150.0).as_deref(),
        Some("https://0.example")
    );

    assert_eq!(engine.world().resource::<Clicked>().0, vec![1, 0]);
}

/// Feeds a resize on the first frame and records what it was shown.
struct ScriptedDriver {
    frames: Vec<FrameInput>,
    presented: Vec<FrameSnapshot>,
}

impl FrameDriver for ScriptedDriver {
    fn next_frame(&mut self) -> Option<FrameInput> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    fn present(&mut self, frame: &FrameSnapshot) {
        self.presented.push(frame.clone());
    }
}

#[test]
fn engine_run_applies_input_and_stops_on_teardown() {
    let mut engine = Engine::new(
        GameConfig::new(),
        Viewport { w: 1000.0, h: 800.0 },
        RandomSource::with_seed(8),
    );
    let mut driver = ScriptedDriver {
        frames: vec![
            FrameInput {
                delta: 0.5,
                viewport: Some(Vec2::new(2000.0, 800.0)),
                pointer: Some(Vec2::new(10.0, 10.0)),
                ..FrameInput::default()
            },
            FrameInput {
                delta: 0.5,
                ..FrameInput::default()
            },
        ],
        presented: Vec::new(),
    };

    let ticks = engine.run(&mut driver);

    assert_eq!(ticks, 2);
    assert_eq!(engine.state(), EngineState::Stopped);
    assert_eq!(driver.presented.len(), 2);
    assert_eq!(driver.presented[0].frame, 1);
    assert_eq!(driver.presented[0].diameter, 250.0);
    assert_eq!(
        engine.world().resource::<PointerState>().pos,
        Vec2::new(10.0, 10.0)
    );
    assert!(approx_eq(engine.world().resource::<WorldTime>().elapsed, 1.0));
}
