// Random scene generation: scatters obstacles and robots over a coarse grid

use crate::config::{self, GENERATE_GRID_CELL, GENERATE_MAX_ATTEMPTS, OBSTACLE_SIZE};
use crate::geometry::Vec2;
use crate::obstacle::Obstacle;
use crate::robot::{Robot, RobotKind};
use crate::scene::Scene;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::f64::consts::TAU;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub width: f64,
    pub height: f64,
    pub obstacles: usize,
    pub robots: usize,
    pub seed: Option<u64>, // Same seed, same scene
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            width: config::DEFAULT_ROOM_WIDTH,
            height: config::DEFAULT_ROOM_HEIGHT,
            obstacles: 5,
            robots: 3,
            seed: None,
        }
    }
}

/// Builds a scene with each entity in its own grid cell, so nothing starts
/// overlapping. Entities that find no free cell are left out.
pub fn generate_scene(cfg: &GeneratorConfig) -> Scene {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let grid_width = (cfg.width / GENERATE_GRID_CELL).floor().max(0.0) as u32;
    let grid_height = (cfg.height / GENERATE_GRID_CELL).floor().max(0.0) as u32;

    let mut scene = Scene {
        size: Some(Vec2::new(cfg.width, cfg.height)),
        ..Scene::default()
    };
    if grid_width == 0 || grid_height == 0 {
        log::warn!("Room {}x{} is too small to place anything", cfg.width, cfg.height);
        return scene;
    }

    log::info!("Placing {} obstacles and {} robots...", cfg.obstacles, cfg.robots);
    let mut occupied_cells = HashSet::new();

    for _ in 0..cfg.obstacles {
        let Some(cell) = free_cell(&mut rng, grid_width, grid_height, &mut occupied_cells) else {
            break;
        };
        let margin = (GENERATE_GRID_CELL - OBSTACLE_SIZE) / 2.0;
        scene.obstacles.push(Obstacle::square(cell_origin(cell) + Vec2::new(margin, margin)));
    }

    for _ in 0..cfg.robots {
        let Some(cell) = free_cell(&mut rng, grid_width, grid_height, &mut occupied_cells) else {
            break;
        };
        let center = cell_origin(cell) + Vec2::new(GENERATE_GRID_CELL, GENERATE_GRID_CELL) / 2.0;
        let kind = RobotKind::ALL[rng.gen_range(0..RobotKind::ALL.len())];
        let mut robot = Robot::placed(kind, center);
        robot.set_angle(rng.gen_range(0.0..TAU));
        scene.robots.push(robot);
    }

    if scene.obstacles.len() < cfg.obstacles || scene.robots.len() < cfg.robots {
        log::warn!(
            "Only placed {} obstacles and {} robots",
            scene.obstacles.len(),
            scene.robots.len()
        );
    }
    scene
}

fn cell_origin((grid_x, grid_y): (u32, u32)) -> Vec2 {
    Vec2::new(grid_x as f64 * GENERATE_GRID_CELL, grid_y as f64 * GENERATE_GRID_CELL)
}

fn free_cell(
    rng: &mut StdRng,
    grid_width: u32,
    grid_height: u32,
    occupied_cells: &mut HashSet<(u32, u32)>,
) -> Option<(u32, u32)> {
    if occupied_cells.len() as u64 >= grid_width as u64 * grid_height as u64 {
        return None;
    }
    for _ in 0..GENERATE_MAX_ATTEMPTS {
        let cell = (rng.gen_range(0..grid_width), rng.gen_range(0..grid_height));
        if occupied_cells.insert(cell) {
            return Some(cell);
        }
    }
    None
}
