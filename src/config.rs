//! Configuration constants for the robot arena simulation.

use std::f64::consts::{E, PI};

// Robots
pub const ROBOT_RADIUS: f64 = 25.0; // Hitbox radius of every robot
pub const ROBOT_BORDER: f64 = 3.0; // Outline inset, only used when drawing

// Obstacles
pub const OBSTACLE_SIZE: f64 = 60.0; // Side of an obstacle placed from the editor

// Room
pub const DEFAULT_ROOM_WIDTH: f64 = 900.0;
pub const DEFAULT_ROOM_HEIGHT: f64 = 520.0; // 600 px window minus the tool bars

// Simulation cadence
pub const TICK_MS: u64 = 10; // One tick every 10 ms while running
pub const TICK_SECONDS: f64 = TICK_MS as f64 / 1000.0;
pub const MAX_FRAME_STEPS: u32 = 25; // Ticks a single frame may catch up before dropping time

// Defaults for robots placed interactively
pub const DEFAULT_SPEED: f64 = 20.0; // Units per second
pub const DEFAULT_ANGLE: f64 = PI / 2.0; // Facing down the screen

// Defaults for attributes omitted from a scene file
pub const LOAD_DEFAULT_SPEED: f64 = 0.0;
pub const LOAD_DEFAULT_ANGLE_DEG: f64 = -90.0;

// Steering and elide behaviour
pub const DEFAULT_ROTATION_SPEED: f64 = PI / 4.0; // Radians per second
pub const DEFAULT_ELIDE_DISTANCE: f64 = 20.0; // Units in front of the robot
pub const DEFAULT_ELIDE_ROTATION: f64 = PI / E; // Radians turned per elide

// Random scene generation
pub const GENERATE_GRID_CELL: f64 = OBSTACLE_SIZE * 1.5; // Spacing of candidate positions
pub const GENERATE_MAX_ATTEMPTS: u32 = 1000; // Placement attempts before giving up
