//! Sticker colours and the directional shading model.
//!
//! Every polygon gets a single brightness scalar: the sum over all lights of
//! the unsigned cosine between the light direction and the polygon normal,
//! capped at 1 and then raised to a floor so nothing goes fully dark.

use crate::geometry::{Point, Vector};
use crate::plane::FacePlane;

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Multiplies every channel by `factor`, truncating like an integer cast.
    pub fn shaded(self, factor: f64) -> Rgb {
        let channel = |c: u8| (c as f64 * factor.clamp(0.0, 1.0)) as u8;
        Rgb(channel(self.0), channel(self.1), channel(self.2))
    }

    /// Channels as `0.0..=1.0` floats.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point,
}

impl Light {
    pub const fn new(position: Point) -> Self {
        Self { position }
    }

    /// `|cos|` of the angle between `normal` and the direction from
    /// `centroid` to the light. Zero when either direction is degenerate.
    pub fn cosine(&self, centroid: Point, normal: &Vector) -> f64 {
        let to_light = Vector::between(centroid, self.position);
        to_light.cosine_to(normal).map_or(0.0, f64::abs)
    }
}

/// Outward normal of a polygon, or `None` if its first three vertices are
/// collinear.
pub fn polygon_normal(polygon: &[Point], model_center: Point) -> Option<Vector> {
    let [p0, p1, p2] = match polygon {
        [p0, p1, p2, ..] => [*p0, *p1, *p2],
        _ => return None,
    };
    let plane = FacePlane::through(p0, p1, p2);
    if plane.is_degenerate() {
        return None;
    }
    let mut normal = plane.normal();
    normal.orient_toward(&Vector::between(model_center, Point::centroid(polygon)));
    Some(normal)
}

/// Brightness of `polygon` under `lights`, in `shadow_floor..=1.0`.
///
/// With no lights at all the polygon is fully lit.
pub fn shade(polygon: &[Point], model_center: Point, lights: &[Light], shadow_floor: f64) -> f64 {
    if lights.is_empty() {
        return 1.0;
    }
    let Some(normal) = polygon_normal(polygon, model_center) else {
        return shadow_floor;
    };
    let centroid = Point::centroid(polygon);
    let total: f64 = lights.iter().map(|light| light.cosine(centroid, &normal)).sum();
    total.min(1.0).max(shadow_floor)
}
