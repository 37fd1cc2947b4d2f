// Axis-aligned rectangle, normalized so that width and height are never negative

use super::vec2::Vec2;
use std::fmt;

/// Axis-aligned rectangle given by its top-left corner and size.
///
/// Y grows downward, so `top <= bottom` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pos: Vec2,
    size: Vec2,
}

impl Rect {
    /// Creates a rectangle. A negative width or height is folded into the
    /// position so the covered area stays the same.
    pub fn new(mut pos: Vec2, mut size: Vec2) -> Self {
        if size.x < 0.0 {
            pos.x += size.x;
            size.x = -size.x;
        }
        if size.y < 0.0 {
            pos.y += size.y;
            size.y = -size.y;
        }
        Rect { pos, size }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect::new(Vec2::new(x, y), Vec2::new(width, height))
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn top_left(&self) -> Vec2 {
        self.pos
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Corners in the order top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    /// The four edges as `(start, end)` segments. Every segment runs from
    /// the smaller to the larger coordinate along its axis.
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        [
            (self.top_left(), self.top_right()),
            (self.top_right(), self.bottom_right()),
            (self.bottom_left(), self.bottom_right()),
            (self.top_left(), self.bottom_left()),
        ]
    }

    /// Horizontal range `(left, right)`.
    pub fn horizontal(&self) -> Vec2 {
        Vec2::new(self.left(), self.right())
    }

    /// Vertical range `(top, bottom)`.
    pub fn vertical(&self) -> Vec2 {
        Vec2::new(self.top(), self.bottom())
    }

    pub fn with_pos(&self, pos: Vec2) -> Rect {
        Rect::new(pos, self.size)
    }

    pub fn with_size(&self, size: Vec2) -> Rect {
        Rect::new(self.pos, size)
    }

    // Edge setters move the rectangle, they never resize it.

    pub fn with_left(&self, left: f64) -> Rect {
        self.with_pos(self.pos.with_x(left))
    }

    pub fn with_right(&self, right: f64) -> Rect {
        self.with_pos(self.pos.with_x(right - self.size.x))
    }

    pub fn with_top(&self, top: f64) -> Rect {
        self.with_pos(self.pos.with_y(top))
    }

    pub fn with_bottom(&self, bottom: f64) -> Rect {
        self.with_pos(self.pos.with_y(bottom - self.size.y))
    }

    pub fn move_by(&self, offset: Vec2) -> Rect {
        self.with_pos(self.pos + offset)
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Vec2) -> bool {
        point.is_in_rect(self.pos, self.size)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.top_left()) && self.contains(other.bottom_right())
    }

    /// True when both axis projections overlap. Rectangles that only share
    /// an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.horizontal().range_overlaps(other.horizontal())
            && self.vertical().range_overlaps(other.vertical())
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect{{{}, {}}}", self.pos, self.size)
    }
}
