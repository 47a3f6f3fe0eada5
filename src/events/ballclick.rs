//! Ball click event and observer.
//!
//! A [`BallClickedEvent`] carries the clicked ball's id and URL. The
//! [`open_link_observer`] hands the URL to the operating system when the
//! [`LinkOpening`] resource is present; otherwise the click is only logged.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::resources::linkopening::LinkOpening;

/// Event fired when the user clicks on a ball.
#[derive(Event, Debug, Clone)]
pub struct BallClickedEvent {
    pub id: usize,
    pub url: String,
}

/// Open the clicked ball's URL in the default browser.
///
/// Opening is detached from the animation loop and failures are logged only.
pub fn open_link_observer(trigger: On<BallClickedEvent>, opening: Option<Res<LinkOpening>>) {
    let event = trigger.event();
    debug!("Ball {} clicked, url {}", event.id, event.url);

    if opening.is_none() {
        return;
    }
    if let Err(e) = open::that_detached(&event.url) {
        warn!("Failed to open {}: {}", event.url, e);
    }
}
