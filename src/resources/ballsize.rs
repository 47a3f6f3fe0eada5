//! Ball diameter resource.
//!
//! All balls share one diameter. It is either fixed or a percentage of the
//! viewport width clamped to a pixel range, and is recomputed whenever the
//! viewport is resized (see [`crate::events::viewport`]).

use bevy_ecs::prelude::Resource;

/// How the ball diameter follows the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRule {
    /// Diameter as a percentage of the viewport width.
    pub vw: f32,
    /// Smallest responsive diameter in pixels.
    pub min: f32,
    /// Largest responsive diameter in pixels.
    pub max: f32,
    /// When set, overrides the responsive diameter.
    pub fixed: Option<f32>,
}

impl Default for SizeRule {
    fn default() -> Self {
        Self {
            vw: 15.0,
            min: 100.0,
            max: 250.0,
            fixed: None,
        }
    }
}

/// Current ball diameter in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct BallSize {
    pub diameter: f32,
}

impl BallSize {
    /// Diameter for a viewport `width` pixels wide.
    pub fn from_viewport_width(width: f32, rule: &SizeRule) -> Self {
        let diameter = match rule.fixed {
            Some(fixed) => fixed,
            None => (width * rule.vw / 100.0).clamp(rule.min, rule.max),
        };
        Self { diameter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_follows_viewport_width() {
        let size = BallSize::from_viewport_width(1000.0, &SizeRule::default());
        assert_eq!(size.diameter, 150.0);
    }

    #[test]
    fn test_size_clamps_to_max_on_wide_viewport() {
        let size = BallSize::from_viewport_width(2000.0, &SizeRule::default());
        assert_eq!(size.diameter, 250.0);
    }

    #[test]
    fn test_size_clamps_to_min_on_narrow_viewport() {
        let size = BallSize::from_viewport_width(320.0, &SizeRule::default());
        assert_eq!(size.diameter, 100.0);
    }

    #[test]
    fn test_fixed_size_ignores_viewport() {
        let rule = SizeRule {
            fixed: Some(120.0),
            ..SizeRule::default()
        };
        assert_eq!(BallSize::from_viewport_width(5000.0, &rule).diameter, 120.0);
        assert_eq!(BallSize::from_viewport_width(10.0, &rule).diameter, 120.0);
    }
}
