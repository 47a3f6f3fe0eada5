//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: timing, viewport and pointer input,
//! configuration and randomness. Each submodule documents the semantics and
//! intended usage of its resource(s).
//!
//! Overview
//! - `ballsize` – shared ball diameter and the rule deriving it from the viewport
//! - `gameconfig` – window, physics, sizing and ball settings from `config.ini`
//! - `linkopening` – presence lets clicks open URLs
//! - `pointer` – last observed pointer position
//! - `rng` – seedable random source for spawning and drift
//! - `viewport` – current drawable area in pixels
//! - `worldtime` – simulation time, delta and frame count
pub mod ballsize;
pub mod gameconfig;
pub mod linkopening;
pub mod pointer;
pub mod rng;
pub mod viewport;
pub mod worldtime;
