//! Frame drivers.
//!
//! - [`headless`] – fixed frame count, JSON lines output; always available
//! - `window` – raylib window; needs the `window` feature

pub mod headless;
#[cfg(feature = "window")]
pub mod window;
