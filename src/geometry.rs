//! 3D point and vector algebra.
//!
//! Coordinates follow the drawing surface: x grows to the right, y grows
//! downward and z grows toward the viewer. Rotations are always about the
//! coordinate origin, so rotating about any other pivot means translating the
//! pivot to the origin first and back afterwards.
//!
//! [`Point`] and [`Vector`] wrap `glam::DVec3` so that positions and
//! directions stay distinct types; their components are readable through
//! `Deref`.

use std::fmt;
use std::ops::{Add, AddAssign, Deref, Mul, Neg, Sub};
use std::str::FromStr;

use glam::DVec3;

use crate::error::Error;

/// Below this length a vector is treated as zero.
pub const LENGTH_EPSILON: f64 = 1e-12;

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            _ => Err(Error::UnknownAxis(name.to_owned())),
        }
    }
}

/// A precomputed sine/cosine pair.
///
/// Incremental rotations touch every vertex of a model with the same angle,
/// so the trigonometry is done once per step rather than once per point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trig {
    pub sin: f64,
    pub cos: f64,
}

impl Trig {
    pub const IDENTITY: Trig = Trig { sin: 0.0, cos: 1.0 };

    pub fn from_degrees(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { sin, cos }
    }

    /// The rotation by the opposite angle.
    pub fn inverse(self) -> Self {
        Self {
            sin: -self.sin,
            cos: self.cos,
        }
    }
}

/// A position in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(DVec3);

impl Point {
    pub const ORIGIN: Point = Point(DVec3::ZERO);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    pub fn translate(&mut self, offset: Vector) {
        self.0 += offset.0;
    }

    /// Moves the point away from (or toward) `pivot` by `factor`.
    pub fn scale(&mut self, factor: f64, pivot: Point) {
        self.0 = pivot.0 + (self.0 - pivot.0) * factor;
    }

    pub fn rotate_x(&mut self, degrees: f64) {
        self.rotate_x_trig(Trig::from_degrees(degrees));
    }

    pub fn rotate_y(&mut self, degrees: f64) {
        self.rotate_y_trig(Trig::from_degrees(degrees));
    }

    pub fn rotate_z(&mut self, degrees: f64) {
        self.rotate_z_trig(Trig::from_degrees(degrees));
    }

    #[inline]
    pub fn rotate_x_trig(&mut self, trig: Trig) {
        let DVec3 { y, z, .. } = self.0;
        self.0.y = y * trig.cos - z * trig.sin;
        self.0.z = y * trig.sin + z * trig.cos;
    }

    #[inline]
    pub fn rotate_y_trig(&mut self, trig: Trig) {
        let DVec3 { x, z, .. } = self.0;
        self.0.x = x * trig.cos + z * trig.sin;
        self.0.z = -x * trig.sin + z * trig.cos;
    }

    #[inline]
    pub fn rotate_z_trig(&mut self, trig: Trig) {
        let DVec3 { x, y, .. } = self.0;
        self.0.x = x * trig.cos - y * trig.sin;
        self.0.y = x * trig.sin + y * trig.cos;
    }

    pub fn rotate(&mut self, axis: Axis, trig: Trig) {
        match axis {
            Axis::X => self.rotate_x_trig(trig),
            Axis::Y => self.rotate_y_trig(trig),
            Axis::Z => self.rotate_z_trig(trig),
        }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.0.distance(other.0)
    }

    /// `[x, y, z, 1]`, for evaluating plane equations at this point.
    pub fn homogeneous(&self) -> [f64; 4] {
        self.0.extend(1.0).to_array()
    }

    /// The position vector from the origin.
    pub fn to_vector(self) -> Vector {
        Vector(self.0)
    }

    /// Arithmetic mean of a set of points; the origin for an empty set.
    pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point>) -> Point {
        let (sum, count) = points
            .into_iter()
            .fold((DVec3::ZERO, 0usize), |(sum, count), point| {
                (sum + point.0, count + 1)
            });
        if count == 0 {
            return Point::ORIGIN;
        }
        Point(sum / count as f64)
    }

    /// The point splitting `from -> to` so that it sits `ratio` times as far
    /// from `from` as from `to`.
    pub fn divide(from: Point, to: Point, ratio: f64) -> Point {
        Point((from.0 + to.0 * ratio) / (1.0 + ratio))
    }
}

impl Deref for Point {
    type Target = DVec3;

    fn deref(&self) -> &DVec3 {
        &self.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.0.x, self.0.y, self.0.z)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

/// A free direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector(DVec3);

impl Vector {
    pub const ZERO: Vector = Vector(DVec3::ZERO);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// The vector pointing from `start` to `finish`.
    pub fn between(start: Point, finish: Point) -> Self {
        finish - start
    }

    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Length of the projection onto the XY plane.
    pub fn length_xy(&self) -> f64 {
        self.0.truncate().length()
    }

    /// Scales the vector to unit length. Zero vectors are left untouched.
    pub fn normalize(&mut self) {
        let length = self.length();
        if length > LENGTH_EPSILON {
            self.0 /= length;
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.0.dot(other.0)
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Vector(self.0.cross(other.0))
    }

    /// Flips the vector if it points away from `reference`.
    pub fn orient_toward(&mut self, reference: &Vector) {
        if self.dot(reference) < 0.0 {
            *self = -*self;
        }
    }

    /// Cosine of the angle to `other`, or `None` if either is zero-length.
    pub fn cosine_to(&self, other: &Vector) -> Option<f64> {
        let lengths = self.length() * other.length();
        (lengths > LENGTH_EPSILON).then(|| self.dot(other) / lengths)
    }
}

impl Deref for Vector {
    type Target = DVec3;

    fn deref(&self) -> &DVec3 {
        &self.0
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}
