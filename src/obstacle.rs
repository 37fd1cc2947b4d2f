use crate::arena::EntityId;
use crate::config::OBSTACLE_SIZE;
use crate::geometry::{Rect, Vec2};
use crate::utils::unsigned_zero;
use std::fmt;

/// Static rectangular obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    id: EntityId,
    hitbox: Rect,
    dragging: bool,
}

impl Obstacle {
    pub fn new(hitbox: Rect) -> Self {
        Obstacle {
            id: EntityId::UNASSIGNED,
            hitbox,
            dragging: false,
        }
    }

    /// Square obstacle of the editor's default size with its top-left at `pos`.
    pub fn square(pos: Vec2) -> Self {
        Obstacle::new(Rect::new(pos, Vec2::new(OBSTACLE_SIZE, OBSTACLE_SIZE)))
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    pub fn set_hitbox(&mut self, hitbox: Rect) {
        self.hitbox = hitbox;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }
}

/// The obstacle's scene-file record, as written by [`crate::scene::write_scene`].
impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "obstacle: {}x{} [{}, {}]",
            unsigned_zero(self.hitbox.width()),
            unsigned_zero(self.hitbox.height()),
            unsigned_zero(self.hitbox.x()),
            unsigned_zero(self.hitbox.y())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_default_size() {
        let o = Obstacle::square(Vec2::new(100.0, 200.0));
        assert_eq!(o.hitbox(), Rect::from_xywh(100.0, 200.0, 60.0, 60.0));
        assert!(!o.is_dragging());
        assert_eq!(o.id(), EntityId::UNASSIGNED);
    }

    #[test]
    fn test_display_matches_scene_syntax() {
        let o = Obstacle::new(Rect::from_xywh(100.0, 200.0, 60.0, 40.5));
        assert_eq!(o.to_string(), "obstacle: 60x40.5 [100, 200]");
    }

    #[test]
    fn test_display_writes_unsigned_zero() {
        let o = Obstacle::new(Rect::from_xywh(-0.0, -0.0, 60.0, 60.0));
        assert_eq!(o.to_string(), "obstacle: 60x60 [0, 0]");
    }
}
