//! Geometry primitives shared by the arena, its entities and the scene codec.
//!
//! All types are small `Copy` values. Coordinates follow screen convention:
//! `x` grows to the right, `y` grows downward.

mod circle;
mod rect;
mod vec2;

pub use circle::Circle;
pub use rect::Rect;
pub use vec2::Vec2;
