//! Animation engine and frame scheduling.
//!
//! [`Engine`] owns the ECS world holding the balls and the schedule that
//! advances them. It is either running or stopped:
//!
//! - [`Engine::start`] enters the running state.
//! - [`Engine::tick`] advances the world by one tick while running and does
//!   nothing once stopped.
//! - [`Engine::stop`] tears the loop down. There is no pause/resume.
//!
//! Frames are paced from outside through a [`FrameDriver`]: the driver says
//! when the next frame is ready (and what input arrived since the last one)
//! and receives the snapshot to draw. [`Engine::run`] ties the two together
//! and stops when the driver reports teardown by returning `None`.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::events::ballclick::{BallClickedEvent, open_link_observer};
use crate::events::viewport::{ViewportResizedEvent, viewport_resized_observer};
use crate::resources::ballsize::BallSize;
use crate::resources::gameconfig::GameConfig;
use crate::resources::linkopening::LinkOpening;
use crate::resources::pointer::PointerState;
use crate::resources::rng::RandomSource;
use crate::resources::viewport::Viewport;
use crate::resources::worldtime::WorldTime;
use crate::systems::physics::physics_step;
use crate::systems::snapshot::{FrameSnapshot, snapshot};
use crate::systems::spawn::spawn_balls;
use crate::systems::time::update_world_time;

/// Whether the engine is scheduling ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Stopped,
}

/// Input collected by a driver since the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame. Only world time uses it; physics
    /// advances one tick per frame regardless.
    pub delta: f32,
    /// Latest pointer position, if the pointer moved.
    pub pointer: Option<Vec2>,
    /// New viewport size, if it changed.
    pub viewport: Option<Vec2>,
    /// Position of a primary click, if one happened.
    pub click: Option<Vec2>,
}

/// A source of frames and a sink for what to draw on them.
pub trait FrameDriver {
    /// Block until the next frame is ready and report input gathered since the
    /// last one. `None` means the view is being torn down.
    fn next_frame(&mut self) -> Option<FrameInput>;

    /// Draw (or otherwise consume) the state after a tick.
    fn present(&mut self, frame: &FrameSnapshot);
}

/// The animation engine: a world of balls plus the schedule advancing it.
pub struct Engine {
    world: World,
    update: Schedule,
    state: EngineState,
}

impl Engine {
    /// Build the world, spawn one ball per configured asset inside `viewport`
    /// and register observers. The engine starts stopped.
    pub fn new(config: GameConfig, viewport: Viewport, rng: RandomSource) -> Self {
        let mut world = World::new();
        let ball_size = BallSize::from_viewport_width(viewport.w, &config.size);

        world.insert_resource(WorldTime::default());
        world.insert_resource(viewport);
        world.insert_resource(ball_size);
        world.insert_resource(PointerState::default());
        world.insert_resource(rng);
        world.insert_resource(config);

        world.spawn(Observer::new(viewport_resized_observer));
        world.spawn(Observer::new(open_link_observer));
        // Ensure the observers are registered before anything triggers events.
        world.flush();

        spawn_balls(&mut world);

        let mut update = Schedule::default();
        update.add_systems(physics_step);

        Self {
            world,
            update,
            state: EngineState::Stopped,
        }
    }

    /// Let clicks open URLs in the default browser.
    pub fn with_link_opening(mut self) -> Self {
        self.world.insert_resource(LinkOpening {});
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Enter the running state.
    pub fn start(&mut self) {
        if self.state != EngineState::Running {
            info!("Animation engine started");
            self.state = EngineState::Running;
        }
    }

    /// Stop scheduling ticks. A tick already in progress is never interrupted.
    pub fn stop(&mut self) {
        if self.state != EngineState::Stopped {
            info!("Animation engine stopped");
            self.state = EngineState::Stopped;
        }
    }

    /// Advance the world by one tick. Returns `false` without touching the
    /// world when the engine is stopped.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.is_running() {
            return false;
        }
        update_world_time(&mut self.world, delta);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
        true
    }

    /// Record the pointer position read by the next tick.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.world.resource_mut::<PointerState>().pos = Vec2::new(x, y);
    }

    /// Update the viewport size and recompute the ball diameter.
    pub fn resize(&mut self, w: f32, h: f32) {
        self.world.trigger(ViewportResizedEvent { w, h });
    }

    /// Hit-test a click and fire a [`BallClickedEvent`] for the ball under it.
    /// Returns the URL of the clicked ball.
    pub fn click(&mut self, x: f32, y: f32) -> Option<String> {
        let frame = self.snapshot();
        let ball = frame.ball_at(Vec2::new(x, y))?;
        debug!("Click at ({}, {}) hit ball {}", x, y, ball.id);
        let event = BallClickedEvent {
            id: ball.id,
            url: ball.url.clone(),
        };
        self.world.trigger(event);
        Some(ball.url.clone())
    }

    /// Apply everything a driver collected for one frame, in the order
    /// resize, pointer, click.
    pub fn apply(&mut self, input: &FrameInput) {
        if let Some(size) = input.viewport {
            self.resize(size.x, size.y);
        }
        if let Some(pointer) = input.pointer {
            self.set_pointer(pointer.x, pointer.y);
        }
        if let Some(click) = input.click {
            self.click(click.x, click.y);
        }
    }

    /// Current renderable state.
    pub fn snapshot(&mut self) -> FrameSnapshot {
        snapshot(&mut self.world)
    }

    /// Drive the engine from `driver` until it reports teardown.
    ///
    /// Returns the number of ticks run.
    pub fn run<D: FrameDriver>(&mut self, driver: &mut D) -> u64 {
        self.start();
        let mut ticks = 0;
        while self.is_running() {
            let Some(input) = driver.next_frame() else {
                self.stop();
                break;
            };
            self.apply(&input);
            if self.tick(input.delta) {
                ticks += 1;
            }
            let frame = self.snapshot();
            driver.present(&frame);
        }
        ticks
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
