// Arena errors: lookups of entities by id

use crate::arena::EntityId;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    #[error("No entity with id {0} in the arena")]
    UnknownEntity(EntityId),
    #[error("Entity {0} is an obstacle, not a robot")]
    NotARobot(EntityId),
    #[error("Entity {0} is a robot, not an obstacle")]
    NotAnObstacle(EntityId),
}
