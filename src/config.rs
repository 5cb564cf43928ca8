//! Runtime settings for the engine.
//!
//! There is no global configuration: an [`EngineConfig`] is built once (from
//! defaults, optionally overridden by command-line flags) and passed to
//! whatever needs it.

use crate::geometry::{Point, Vector};

/// Width of the drawing area the default centre is placed in.
const CANVAS_WIDTH: f64 = 1050.0;
/// Height of the drawing area.
const CANVAS_HEIGHT: f64 = 760.0;
/// Margin between the window edge and the drawing area.
const CANVAS_MARGIN: f64 = 30.0;

/// Turn speed used when none (or a nonsensical one) is given.
pub const DEFAULT_DEGREES_PER_TICK: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Half-size of the whole body at scale 1.
    pub size: f64,
    /// Model centre in surface coordinates.
    pub center: Point,
    /// How far in front of the centre (+z) the viewer sits.
    pub viewer_distance: f64,
    /// Minimum signed distance, in model units, for a face to count as visible.
    pub visibility_epsilon: f64,
    /// Darkest a lit polygon may get.
    pub shadow_floor: f64,
    /// Width of the black outline around every polygon.
    pub stroke_width: f64,
    /// Degrees a turning layer advances per tick.
    pub degrees_per_tick: f64,
    /// Degrees per whole-body rotation request from the viewer.
    pub rotation_step: f64,
    /// Initial rotation about the y axis.
    pub initial_yaw: f64,
    /// Initial rotation about the x axis, applied after the yaw.
    pub initial_pitch: f64,
    /// Light positions a fresh model starts with.
    pub lights: Vec<Point>,
}

impl EngineConfig {
    /// Where the viewer looks from.
    pub fn viewer(&self) -> Point {
        self.center + Vector::new(0.0, 0.0, self.viewer_distance)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let center = Point::new(
            CANVAS_WIDTH / 2.0 + CANVAS_MARGIN,
            CANVAS_HEIGHT / 2.0 + CANVAS_MARGIN,
            0.0,
        );
        Self {
            size: 150.0,
            center,
            viewer_distance: 100_000.0,
            visibility_epsilon: 1e-3,
            shadow_floor: 0.15,
            stroke_width: 6.0,
            degrees_per_tick: DEFAULT_DEGREES_PER_TICK,
            rotation_step: 15.0,
            initial_yaw: 45.0,
            initial_pitch: -30.0,
            lights: vec![
                center + Vector::new(1000.0, 0.0, 1000.0),
                center + Vector::new(-1000.0, 0.0, 1000.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_center_matches_canvas() {
        let config = EngineConfig::default();
        assert_eq!(config.center, Point::new(555.0, 410.0, 0.0));
        assert_eq!(config.viewer(), Point::new(555.0, 410.0, 100_000.0));
        assert_eq!(config.lights.len(), 2);
    }
}
