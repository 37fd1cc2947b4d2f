// Robot arena: robots and obstacles in a bounded room, advanced in fixed ticks

pub mod arena;
pub mod collision;
pub mod config;
pub mod error;
pub mod generate;
pub mod geometry;
pub mod logging;
pub mod obstacle;
pub mod robot;
pub mod scene;
pub mod simulation;
pub mod utils;

pub use arena::{Arena, Entity, EntityId};
pub use error::ArenaError;
pub use obstacle::Obstacle;
pub use robot::{Robot, RobotKind, Steer};
pub use scene::Scene;
pub use simulation::Simulation;
