// The arena: owns every robot and obstacle and advances them one tick at a time

use crate::collision::{clamp_to_bounds, lookahead, resolve_obstacle_collision, resolve_robot_collision};
use crate::config;
use crate::error::ArenaError;
use crate::geometry::{Rect, Vec2};
use crate::logging;
use crate::obstacle::Obstacle;
use crate::robot::{Robot, RobotKind, Steer};
use crate::{debug_arena, debug_collision};
use std::fmt;

/// Identity of an entity inside one arena. Ids are handed out from 1 upwards
/// and never reused by the same arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Id carried by entities that have not been added to an arena yet.
    pub const UNASSIGNED: EntityId = EntityId(0);
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Robot(Robot),
    Obstacle(Obstacle),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Robot(robot) => robot.id(),
            Entity::Obstacle(obstacle) => obstacle.id(),
        }
    }
}

impl From<Robot> for Entity {
    fn from(robot: Robot) -> Self {
        Entity::Robot(robot)
    }
}

impl From<Obstacle> for Entity {
    fn from(obstacle: Obstacle) -> Self {
        Entity::Obstacle(obstacle)
    }
}

type SelectCallback = Box<dyn FnMut(Option<EntityId>)>;

/// Bounded room holding robots and obstacles in insertion order.
///
/// The arena is single-threaded: callers drive it with [`Arena::tick`] and
/// mutate it between ticks. Entities with their drag flag set are skipped by
/// every phase of the tick, leaving their position to whoever is dragging.
pub struct Arena {
    bounds: Rect,
    robots: Vec<Robot>,
    obstacles: Vec<Obstacle>,
    selected: Option<EntityId>,
    on_select: Option<SelectCallback>,
    running: bool,
    next_id: u64,
    ticks: u64, // Ticks executed since creation
}

impl Arena {
    pub fn new(bounds: Rect) -> Self {
        log::info!("Arena created with bounds {}", bounds);
        Arena {
            bounds,
            robots: Vec::new(),
            obstacles: Vec::new(),
            selected: None,
            on_select: None,
            running: true,
            next_id: 1,
            ticks: 0,
        }
    }

    /// The start-up room: one obstacle and one robot of each kind.
    pub fn demo() -> Self {
        let mut arena = Arena::default();
        arena.add(Obstacle::square(Vec2::new(100.0, 200.0)));
        arena.add(Robot::placed(RobotKind::Control, Vec2::new(200.0, 100.0)));
        arena.add(Robot::new(Vec2::new(201.0, 200.0), 0.0, 0.0));
        arena.add(Robot::placed(RobotKind::Auto, Vec2::new(300.0, 100.0)));
        arena
    }

    fn allocate_id(&mut self) -> EntityId {
        // Wraps to 1 past u64::MAX, skipping ids still in use
        loop {
            let id = EntityId(self.next_id);
            self.next_id = self.next_id.checked_add(1).unwrap_or(1);
            let in_use = self.robots.iter().any(|r| r.id() == id)
                || self.obstacles.iter().any(|o| o.id() == id);
            if id != EntityId::UNASSIGNED && !in_use {
                return id;
            }
        }
    }

    /// Adds a robot or obstacle and returns the id assigned to it.
    pub fn add(&mut self, entity: impl Into<Entity>) -> EntityId {
        let id = self.allocate_id();
        match entity.into() {
            Entity::Robot(mut robot) => {
                robot.set_id(id);
                debug_arena!(id => "added {}", robot);
                self.robots.push(robot);
            }
            Entity::Obstacle(mut obstacle) => {
                obstacle.set_id(id);
                debug_arena!(id => "added {}", obstacle);
                self.obstacles.push(obstacle);
            }
        }
        id
    }

    /// Removes an entity, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let removed = if let Some(index) = self.robots.iter().position(|r| r.id() == id) {
            Entity::Robot(self.robots.remove(index))
        } else if let Some(index) = self.obstacles.iter().position(|o| o.id() == id) {
            Entity::Obstacle(self.obstacles.remove(index))
        } else {
            return None;
        };

        debug_arena!(id => "removed");
        if self.selected == Some(id) {
            self.set_selected(None);
        }
        Some(removed)
    }

    pub fn remove_selected(&mut self) -> Option<Entity> {
        let id = self.selected?;
        self.remove(id)
    }

    /// Swaps the robot `id` for `robot` in place. The replacement takes over
    /// the slot, the id and the selection of the old robot.
    pub fn replace(&mut self, id: EntityId, mut robot: Robot) -> Result<(), ArenaError> {
        let slot = self.robot_mut(id)?;
        robot.set_id(id);
        debug_arena!(id => "replaced {} with {}", slot.kind().keyword(), robot.kind().keyword());
        *slot = robot;
        Ok(())
    }

    /// Converts the robot `id` to another variant, keeping its shared state.
    pub fn change_kind(&mut self, id: EntityId, kind: RobotKind) -> Result<(), ArenaError> {
        let converted = self.robot(id)?.with_kind(kind);
        self.replace(id, converted)
    }

    pub fn resize(&mut self, bounds: Rect) {
        log::info!("Arena resized to {}", bounds);
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.robots.iter().any(|r| r.id() == id) || self.obstacles.iter().any(|o| o.id() == id)
    }

    fn missing(&self, id: EntityId, robot_wanted: bool) -> ArenaError {
        let is_robot = self.robots.iter().any(|r| r.id() == id);
        let is_obstacle = self.obstacles.iter().any(|o| o.id() == id);
        match (robot_wanted, is_robot, is_obstacle) {
            (true, _, true) => ArenaError::NotARobot(id),
            (false, true, _) => ArenaError::NotAnObstacle(id),
            _ => ArenaError::UnknownEntity(id),
        }
    }

    pub fn robot(&self, id: EntityId) -> Result<&Robot, ArenaError> {
        self.robots
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| self.missing(id, true))
    }

    pub fn robot_mut(&mut self, id: EntityId) -> Result<&mut Robot, ArenaError> {
        let err = self.missing(id, true);
        self.robots.iter_mut().find(|r| r.id() == id).ok_or(err)
    }

    pub fn obstacle(&self, id: EntityId) -> Result<&Obstacle, ArenaError> {
        self.obstacles
            .iter()
            .find(|o| o.id() == id)
            .ok_or_else(|| self.missing(id, false))
    }

    pub fn obstacle_mut(&mut self, id: EntityId) -> Result<&mut Obstacle, ArenaError> {
        let err = self.missing(id, false);
        self.obstacles.iter_mut().find(|o| o.id() == id).ok_or(err)
    }

    /// Marks an entity as held by the input layer. While set, the tick
    /// neither moves it nor uses it for collisions.
    pub fn set_dragging(&mut self, id: EntityId, dragging: bool) -> Result<(), ArenaError> {
        if let Some(robot) = self.robots.iter_mut().find(|r| r.id() == id) {
            robot.set_dragging(dragging);
        } else if let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.id() == id) {
            obstacle.set_dragging(dragging);
        } else {
            return Err(ArenaError::UnknownEntity(id));
        }
        debug_arena!(id => "dragging {}", dragging);
        Ok(())
    }

    pub fn move_robot_to(&mut self, id: EntityId, center: Vec2) -> Result<(), ArenaError> {
        self.robot_mut(id)?.set_center(center);
        Ok(())
    }

    /// Moves an obstacle so its top-left corner sits at `pos`.
    pub fn move_obstacle_to(&mut self, id: EntityId, pos: Vec2) -> Result<(), ArenaError> {
        let obstacle = self.obstacle_mut(id)?;
        obstacle.set_hitbox(obstacle.hitbox().with_pos(pos));
        Ok(())
    }

    /// Changes the selection. The callback only fires when it actually changes.
    pub fn select(&mut self, id: Option<EntityId>) -> Result<(), ArenaError> {
        if let Some(id) = id {
            if !self.contains(id) {
                return Err(ArenaError::UnknownEntity(id));
            }
        }
        self.set_selected(id);
        Ok(())
    }

    fn set_selected(&mut self, id: Option<EntityId>) {
        if self.selected == id {
            return;
        }
        self.selected = id;
        match id {
            Some(id) => debug_arena!(id => "selected"),
            None => debug_arena!("selection cleared"),
        }
        if let Some(callback) = self.on_select.as_mut() {
            callback(id);
        }
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected == Some(id)
    }

    pub fn set_on_select(&mut self, callback: impl FnMut(Option<EntityId>) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            log::info!("Simulation {}", if running { "running" } else { "paused" });
        }
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sends a steering edge to the selected robot. Only consumed while the
    /// arena is running and the selection is a control robot.
    pub fn steer(&mut self, command: Steer, start: bool) -> bool {
        if !self.running {
            return false;
        }
        let Some(id) = self.selected else {
            return false;
        };
        match self.robots.iter_mut().find(|r| r.id() == id) {
            Some(robot) => robot.steer(command, start),
            None => false,
        }
    }

    /// Replaces every entity at once. Nothing is touched until the new
    /// contents are in hand, so a failed load never leaves a half-built room.
    pub fn clear_and_load(&mut self, obstacles: Vec<Obstacle>, robots: Vec<Robot>) {
        self.set_selected(None);
        self.robots.clear();
        self.obstacles.clear();
        for obstacle in obstacles {
            self.add(obstacle);
        }
        for robot in robots {
            self.add(robot);
        }
        log::info!(
            "Loaded {} obstacles and {} robots",
            self.obstacles.len(),
            self.robots.len()
        );
    }

    /// Free distance in front of `robot` to the border or the nearest
    /// obstacle that is not being dragged.
    pub fn obstacle_distance(&self, robot: &Robot) -> f64 {
        obstacle_distance(robot, &self.bounds, &self.obstacles)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the simulation by `dt` seconds: move, push robots out of
    /// obstacles, push robots apart, then keep them inside the border.
    pub fn tick(&mut self, dt: f64) {
        self.ticks += 1;
        logging::set_tick_context(Some(self.ticks));
        log::trace!(target: "arena", "Tick {} (dt {})", self.ticks, dt);

        // Look-ahead uses each robot's position before it moves
        for robot in self.robots.iter_mut().filter(|r| !r.is_dragging()) {
            let free = obstacle_distance(robot, &self.bounds, &self.obstacles);
            robot.advance(dt, free);
        }

        for obstacle in self.obstacles.iter().filter(|o| !o.is_dragging()) {
            let rect = obstacle.hitbox();
            for robot in self.robots.iter_mut().filter(|r| !r.is_dragging()) {
                if let Some(pushed) = resolve_obstacle_collision(robot.hitbox(), &rect) {
                    debug_collision!(
                        robot.id() => "pushed out of obstacle {} to {}",
                        obstacle.id(),
                        pushed.center()
                    );
                    robot.set_hitbox(pushed);
                }
            }
        }

        for i in 0..self.robots.len() {
            let (head, tail) = self.robots.split_at_mut(i + 1);
            let first = &mut head[i];
            if first.is_dragging() {
                continue;
            }
            for second in tail.iter_mut().filter(|r| !r.is_dragging()) {
                if let Some(push) = resolve_robot_collision(first.hitbox(), second.hitbox()) {
                    debug_collision!(first.id() => "pushed apart from {} by {}", second.id(), push);
                    first.set_hitbox(first.hitbox().move_by(-push));
                    second.set_hitbox(second.hitbox().move_by(push));
                }
            }
        }

        for robot in self.robots.iter_mut().filter(|r| !r.is_dragging()) {
            let clamped = clamp_to_bounds(robot.hitbox(), &self.bounds);
            if clamped != robot.hitbox() {
                debug_collision!(robot.id() => "clamped to border at {}", clamped.center());
                robot.set_hitbox(clamped);
            }
        }
        logging::set_tick_context(None);
    }
}

fn obstacle_distance(robot: &Robot, bounds: &Rect, obstacles: &[Obstacle]) -> f64 {
    let rects = obstacles
        .iter()
        .filter(|o| !o.is_dragging())
        .map(|o| o.hitbox());
    lookahead(&robot.hitbox(), robot.heading(), bounds, rects)
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new(Rect::from_xywh(
            0.0,
            0.0,
            config::DEFAULT_ROOM_WIDTH,
            config::DEFAULT_ROOM_HEIGHT,
        ))
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("bounds", &self.bounds)
            .field("robots", &self.robots)
            .field("obstacles", &self.obstacles)
            .field("selected", &self.selected)
            .field("running", &self.running)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
