// 2D vector: used as point, displacement, size and as a (lo, hi) range

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Immutable pair of `f64` components.
///
/// The same type stands in for a position, a displacement, a size
/// (`width`, `height`) and a one dimensional range (`lo`, `hi`). Callers
/// decide which interpretation applies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Unit vector pointing at `angle` radians (0 = +x, positive toward +y).
    pub fn unit(angle: f64) -> Self {
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Vector from polar coordinates.
    pub fn polar(len: f64, angle: f64) -> Self {
        Vec2::unit(angle) * len
    }

    pub fn width(&self) -> f64 {
        self.x
    }

    pub fn height(&self) -> f64 {
        self.y
    }

    pub fn with_x(self, x: f64) -> Self {
        Vec2::new(x, self.y)
    }

    pub fn with_y(self, y: f64) -> Self {
        Vec2::new(self.x, y)
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn sq_len(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn len(self) -> f64 {
        self.sq_len().sqrt()
    }

    /// Same direction, new length. A zero vector stays zero.
    pub fn with_len(self, len: f64) -> Self {
        let current = self.len();
        if current == 0.0 {
            return Vec2::ZERO;
        }
        self * (len / current)
    }

    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).len()
    }

    /// Strict test: points on the circle edge are outside.
    pub fn is_in_circle(self, center: Vec2, radius: f64) -> bool {
        (self - center).sq_len() < radius * radius
    }

    /// Inclusive test against the rectangle at `pos` with `size`.
    pub fn is_in_rect(self, pos: Vec2, size: Vec2) -> bool {
        self.x >= pos.x
            && self.y >= pos.y
            && self.x <= pos.x + size.width()
            && self.y <= pos.y + size.height()
    }

    // --- Range interpretation: x = lo, y = hi ---

    /// Strict interior containment of `value` in the range `(x, y)`.
    pub fn range_contains(self, value: f64) -> bool {
        self.x < value && self.y > value
    }

    /// Ranges overlap when any endpoint of one lies strictly inside the
    /// other, or both ranges are identical. Touching ranges do not overlap.
    pub fn range_overlaps(self, other: Vec2) -> bool {
        self.range_contains(other.x)
            || self.range_contains(other.y)
            || other.range_contains(self.x)
            || other.range_contains(self.y)
            || self == other
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}
