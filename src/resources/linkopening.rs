//! Link opening toggle.
//!
//! The presence of this resource lets the click observer hand URLs to the
//! operating system. Headless runs and tests leave it out.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, clicked balls open their URL.
#[derive(Resource, Clone, Copy, Debug)]
pub struct LinkOpening {}
