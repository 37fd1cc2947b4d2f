// Circle hitbox used by robots

use super::rect::Rect;
use super::vec2::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Circle {
    center: Vec2,
    radius: f64,
}

impl Circle {
    /// Creates a circle. The radius is stored as its absolute value.
    pub fn new(center: Vec2, radius: f64) -> Self {
        Circle {
            center,
            radius: radius.abs(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn with_center(&self, center: Vec2) -> Circle {
        Circle::new(center, self.radius)
    }

    pub fn with_radius(&self, radius: f64) -> Circle {
        Circle::new(self.center, radius)
    }

    pub fn move_by(&self, offset: Vec2) -> Circle {
        self.with_center(self.center + offset)
    }

    /// The bounding square of the circle.
    pub fn bounding_box(&self) -> Rect {
        let diameter = self.radius * 2.0;
        Rect::new(
            self.center - Vec2::new(self.radius, self.radius),
            Vec2::new(diameter, diameter),
        )
    }

    pub fn left(&self) -> f64 {
        self.center.x - self.radius
    }

    pub fn right(&self) -> f64 {
        self.center.x + self.radius
    }

    pub fn top(&self) -> f64 {
        self.center.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.center.y + self.radius
    }

    /// Strict containment; points on the boundary are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.is_in_circle(self.center, self.radius)
    }

    /// The bounding square must overlap `rect`, and either the rectangle
    /// contains the center or the circle contains one of its corners.
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        rect.overlaps(&self.bounding_box())
            && (rect.contains(self.center) || rect.corners().iter().any(|c| self.contains(*c)))
    }

    /// Strict: circles that only touch do not overlap.
    pub fn overlaps_circle(&self, other: &Circle) -> bool {
        self.center.distance(other.center) < self.radius + other.radius
    }
}
