//! Viewport resize event and observer.
//!
//! Emitting a [`ViewportResizedEvent`] updates the [`Viewport`] resource and
//! recomputes the shared [`BallSize`] from the configured [`SizeRule`]. Balls
//! are not moved; the next physics tick clamps them into the new bounds.
//!
//! [`SizeRule`]: crate::resources::ballsize::SizeRule
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::ballsize::BallSize;
use crate::resources::gameconfig::GameConfig;
use crate::resources::viewport::Viewport;

/// Event fired when the drawable area changes size.
#[derive(Event, Debug, Clone, Copy)]
pub struct ViewportResizedEvent {
    pub w: f32,
    pub h: f32,
}

/// Observer that stores the new viewport size and recomputes the ball diameter.
pub fn viewport_resized_observer(
    trigger: On<ViewportResizedEvent>,
    config: Res<GameConfig>,
    mut viewport: ResMut<Viewport>,
    mut ball_size: ResMut<BallSize>,
) {
    let event = trigger.event();
    viewport.w = event.w;
    viewport.h = event.h;
    *ball_size = BallSize::from_viewport_width(event.w, &config.size);
    info!(
        "Viewport resized to {}x{}, ball diameter {}",
        event.w, event.h, ball_size.diameter
    );
}
