//! Engine systems.
//!
//! This module groups the ECS systems that advance the simulation and project
//! it for rendering.
//!
//! Submodules overview
//! - [`physics`] – run the pure physics step over every ball
//! - [`snapshot`] – project balls into a renderable, hit-testable frame
//! - [`spawn`] – create one ball entity per configured asset
//! - [`time`] – update simulation time and delta

pub mod physics;
pub mod snapshot;
pub mod spawn;
pub mod time;
