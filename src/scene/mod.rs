//! Scene files: the text format used to save and restore an arena.
//!
//! ```text
//! room: 900x520
//! obstacle: 60x60 [100, 200]
//! robot: [201, 200] { speed: 0, angle: 0 }
//! auto_robot: [300, 100] { speed: 20, angle: -90, rotation_speed: 45, elide_distance: 20, elide_rotation: 66 }
//! control_robot: [200, 100] { speed: 20, angle: -90, rotation_speed: 45 }
//! ```
//!
//! Robot positions are hitbox centers, obstacle positions are top-left
//! corners. Angles are degrees, counter-clockwise on screen.

mod error;
mod lexer;
mod parser;
mod writer;

pub use error::{LoadError, SceneError};
pub use lexer::{Lexer, Spanned, Token};
pub use parser::parse_scene;
pub use writer::write_scene;

use crate::arena::Arena;
use crate::geometry::Vec2;
use crate::obstacle::Obstacle;
use crate::robot::Robot;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Entities read from a scene file, held apart from any arena until applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub size: Option<Vec2>, // From the `room:` record, if any
    pub obstacles: Vec<Obstacle>,
    pub robots: Vec<Robot>,
}

impl Scene {
    /// Snapshot of the arena's size and entities.
    pub fn from_arena(arena: &Arena) -> Self {
        Scene {
            size: Some(arena.bounds().size()),
            obstacles: arena.obstacles().to_vec(),
            robots: arena.robots().to_vec(),
        }
    }

    /// Replaces the arena's contents with this scene, resizing the room
    /// first when the scene names a size.
    pub fn apply(self, arena: &mut Arena) {
        if let Some(size) = self.size {
            arena.resize(arena.bounds().with_size(size));
        }
        arena.clear_and_load(self.obstacles, self.robots);
    }
}

impl FromStr for Scene {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scene(s)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_scene(f, self)
    }
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let scene = parse_scene(&text).inspect_err(|err| {
        log::warn!("Failed to load {}: {}", path.display(), err);
    })?;
    log::info!(
        "Loaded scene {} ({} obstacles, {} robots)",
        path.display(),
        scene.obstacles.len(),
        scene.robots.len()
    );
    Ok(scene)
}

pub fn save_file(path: impl AsRef<Path>, arena: &Arena) -> Result<(), SceneError> {
    let path = path.as_ref();
    let text = Scene::from_arena(arena).to_string();
    fs::write(path, text)?;
    log::info!("Saved scene to {}", path.display());
    crate::debug_scene!(
        "wrote {} obstacles and {} robots",
        arena.obstacles().len(),
        arena.robots().len()
    );
    Ok(())
}
