//! Plane equations and convex bodies built from them.
//!
//! A [`Body`] is a convex polyhedron described by one labelled plane per face.
//! Once every plane has been oriented outward, a face is visible from a viewer
//! exactly when the viewer lies strictly on the outer side of its plane.

use crate::geometry::{Point, Vector, LENGTH_EPSILON};

/// `a·x + b·y + c·z + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePlane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl FacePlane {
    /// The plane through three points, pivoting on `p2`.
    ///
    /// The normal is `(p0 - p2) × (p1 - p2)`, so its orientation depends on the
    /// winding of the points. Collinear points yield a zero normal.
    pub fn through(p0: Point, p1: Point, p2: Point) -> Self {
        let normal = (p0 - p2).cross(&(p1 - p2));
        Self::from_normal(normal, p2)
    }

    pub fn from_normal(normal: Vector, on_plane: Point) -> Self {
        Self {
            a: normal.x,
            b: normal.y,
            c: normal.z,
            d: -normal.dot(&on_plane.to_vector()),
        }
    }

    pub fn normal(&self) -> Vector {
        Vector::new(self.a, self.b, self.c)
    }

    /// Raw equation value at `point`.
    pub fn value_at(&self, point: &Point) -> f64 {
        let [x, y, z, w] = point.homogeneous();
        self.a * x + self.b * y + self.c * z + self.d * w
    }

    /// Signed distance from the plane, positive on the normal's side.
    ///
    /// Zero for a degenerate plane.
    pub fn signed_distance(&self, point: &Point) -> f64 {
        let length = self.normal().length();
        if length > LENGTH_EPSILON {
            self.value_at(point) / length
        } else {
            0.0
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal().length() <= LENGTH_EPSILON
    }

    pub fn negate(&mut self) {
        self.a = -self.a;
        self.b = -self.b;
        self.c = -self.c;
        self.d = -self.d;
    }

    /// Flips the plane so that `interior` lies on its negative side.
    pub fn orient_away_from(&mut self, interior: &Point) {
        if self.value_at(interior) > 0.0 {
            self.negate();
        }
    }
}

/// A convex body: one plane per labelled face.
#[derive(Debug, Clone, PartialEq)]
pub struct Body<L> {
    planes: Vec<(L, FacePlane)>,
}

impl<L: Copy> Body<L> {
    pub fn new() -> Self {
        Self { planes: Vec::new() }
    }

    pub fn planes(&self) -> &[(L, FacePlane)] {
        &self.planes
    }

    /// Orients every plane outward, using a point known to be inside.
    pub fn adjust(&mut self, interior: &Point) {
        for (_, plane) in &mut self.planes {
            plane.orient_away_from(interior);
        }
    }

    /// Labels of the faces whose outer side the viewer is on, by more than
    /// `eps` model units.
    pub fn visible(&self, viewer: &Point, eps: f64) -> Vec<L> {
        self.planes
            .iter()
            .filter(|(_, plane)| plane.signed_distance(viewer) > eps)
            .map(|&(label, _)| label)
            .collect()
    }
}

impl<L: Copy> Default for Body<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Copy> FromIterator<(L, FacePlane)> for Body<L> {
    fn from_iter<I: IntoIterator<Item = (L, FacePlane)>>(iter: I) -> Self {
        Self {
            planes: iter.into_iter().collect(),
        }
    }
}
