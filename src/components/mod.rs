//! ECS components for ball entities.
//!
//! Every ball is one entity carrying all of the components below. Together
//! they hold the same state as a [`Body`](crate::physics::Body) plus the
//! ball's identity and link.
//!
//! Submodules overview:
//! - [`ball`] – stable index, image and outbound URL
//! - [`mapposition`] – top-left corner of the ball in viewport pixels
//! - [`rigidbody`] – velocity in pixels per tick
//! - [`rotation`] – rotation angle and rotation speed in degrees
//! - [`wander`] – drift timer for autonomous re-aiming

pub mod ball;
pub mod mapposition;
pub mod rigidbody;
pub mod rotation;
pub mod wander;
