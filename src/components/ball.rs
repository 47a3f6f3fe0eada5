use bevy_ecs::prelude::Component;

/// A ball is identified by a stable index, the image drawn for it and the URL
/// opened when it is clicked. None of these change after spawning.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Ball {
    pub id: usize,
    pub image: String,
    pub url: String,
}
