//! Event types and observers used by the engine.
//!
//! Input arriving from outside the frame loop (viewport resizes, clicks) is
//! turned into events; observers apply their effects immediately.
//!
//! Submodules:
//! - [`ballclick`] – a ball was clicked; opens its URL
//! - [`viewport`] – the viewport changed size; recomputes the ball diameter
pub mod ballclick;
pub mod viewport;
