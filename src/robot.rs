use crate::arena::EntityId;
use crate::config;
use crate::geometry::{Circle, Vec2};
use std::fmt;

/// Which kinematic variant a robot runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotKind {
    Dummy,
    Auto,
    Control,
}

impl RobotKind {
    pub const ALL: [RobotKind; 3] = [RobotKind::Dummy, RobotKind::Auto, RobotKind::Control];

    /// Record identifier used in scene files.
    pub fn keyword(self) -> &'static str {
        match self {
            RobotKind::Dummy => "robot",
            RobotKind::Auto => "auto_robot",
            RobotKind::Control => "control_robot",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<RobotKind> {
        RobotKind::ALL.into_iter().find(|k| k.keyword() == keyword)
    }
}

/// Steering commands for a [`ControlState`] robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Forward,
    Left,
    Right,
}

/// State of a robot that turns away on its own when something is ahead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoState {
    pub elide_distance: f64, // Lookahead at or below which a turn starts
    pub elide_rotation: f64, // Radians turned per elide, signed
    pub rotation_speed: f64, // Radians per second
    rotation_remaining: f64, // Zero while driving straight
    saved_speed: f64,        // Speed to restore once the turn completes
}

impl AutoState {
    pub fn new(elide_distance: f64, elide_rotation: f64, rotation_speed: f64) -> Self {
        AutoState {
            elide_distance,
            elide_rotation,
            rotation_speed,
            rotation_remaining: 0.0,
            saved_speed: 0.0,
        }
    }

    pub fn is_turning(&self) -> bool {
        self.rotation_remaining != 0.0
    }

    pub fn rotation_remaining(&self) -> f64 {
        self.rotation_remaining
    }
}

impl Default for AutoState {
    fn default() -> Self {
        AutoState::new(
            config::DEFAULT_ELIDE_DISTANCE,
            config::DEFAULT_ELIDE_ROTATION,
            config::DEFAULT_ROTATION_SPEED,
        )
    }
}

/// State of a robot steered by forward/left/right commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub rotation_speed: f64, // Radians per second while a turn key is held
    base_speed: f64,         // Speed used when driving forward
    current_speed: f64,
    current_rotation_speed: f64,
}

impl ControlState {
    pub fn new(base_speed: f64, rotation_speed: f64) -> Self {
        ControlState {
            rotation_speed,
            base_speed,
            current_speed: 0.0,
            current_rotation_speed: 0.0,
        }
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    pub fn current_rotation_speed(&self) -> f64 {
        self.current_rotation_speed
    }

    pub fn is_driving(&self) -> bool {
        self.current_speed != 0.0
    }

    /// Applies a start (`true`) or stop (`false`) edge of a steering command.
    pub fn steer(&mut self, command: Steer, start: bool) {
        let rs = self.rotation_speed;
        let cur = self.current_rotation_speed;
        match command {
            Steer::Forward => {
                self.current_speed = if start { self.base_speed } else { 0.0 };
            }
            Steer::Left => {
                self.current_rotation_speed = if start {
                    (cur - rs).max(-rs)
                } else {
                    (cur + rs).min(0.0)
                };
            }
            Steer::Right => {
                self.current_rotation_speed = if start {
                    (cur + rs).min(rs)
                } else {
                    (cur - rs).max(0.0)
                };
            }
        }
    }
}

/// Variant specific motion state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kinematics {
    Dummy,
    Auto(AutoState),
    Control(ControlState),
}

impl Kinematics {
    pub fn kind(&self) -> RobotKind {
        match self {
            Kinematics::Dummy => RobotKind::Dummy,
            Kinematics::Auto(_) => RobotKind::Auto,
            Kinematics::Control(_) => RobotKind::Control,
        }
    }
}

/// Circular mobile agent.
///
/// `angle` is in radians with 0 along +x; because the y axis points down
/// the screen, a positive angle turns clockwise as seen by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    id: EntityId,
    hitbox: Circle,
    speed: f64, // Raw speed; see `speed()` for the value callers should see
    angle: f64,
    kinematics: Kinematics,
    dragging: bool,
}

impl Robot {
    fn with_kinematics(center: Vec2, speed: f64, angle: f64, kinematics: Kinematics) -> Self {
        Robot {
            id: EntityId::UNASSIGNED,
            hitbox: Circle::new(center, config::ROBOT_RADIUS),
            speed,
            angle,
            kinematics,
            dragging: false,
        }
    }

    /// Robot without any behaviour of its own: it drives straight.
    pub fn new(center: Vec2, speed: f64, angle: f64) -> Self {
        Robot::with_kinematics(center, speed, angle, Kinematics::Dummy)
    }

    pub fn auto(
        center: Vec2,
        speed: f64,
        angle: f64,
        elide_distance: f64,
        elide_rotation: f64,
        rotation_speed: f64,
    ) -> Self {
        let state = AutoState::new(elide_distance, elide_rotation, rotation_speed);
        Robot::with_kinematics(center, speed, angle, Kinematics::Auto(state))
    }

    pub fn control(center: Vec2, speed: f64, angle: f64, rotation_speed: f64) -> Self {
        let state = ControlState::new(speed, rotation_speed);
        Robot::with_kinematics(center, speed, angle, Kinematics::Control(state))
    }

    /// Robot of `kind` with the defaults used when placing one in the editor.
    pub fn placed(kind: RobotKind, center: Vec2) -> Self {
        let robot = Robot::new(center, config::DEFAULT_SPEED, config::DEFAULT_ANGLE);
        robot.with_kind(kind)
    }

    /// Re-derives this robot as another variant. Position, effective speed,
    /// angle, identity and drag state carry over, as does the rotation
    /// speed between the auto and control variants. Anything else takes
    /// its default and transient state starts fresh.
    pub fn with_kind(&self, kind: RobotKind) -> Robot {
        let speed = self.speed();
        let kinematics = match kind {
            RobotKind::Dummy => Kinematics::Dummy,
            RobotKind::Auto => {
                let mut state = match self.kinematics {
                    Kinematics::Auto(old) => {
                        AutoState::new(old.elide_distance, old.elide_rotation, old.rotation_speed)
                    }
                    Kinematics::Control(old) => AutoState {
                        rotation_speed: old.rotation_speed,
                        ..AutoState::default()
                    },
                    Kinematics::Dummy => AutoState::default(),
                };
                state.saved_speed = speed;
                Kinematics::Auto(state)
            }
            RobotKind::Control => {
                let rotation_speed = self
                    .rotation_speed()
                    .unwrap_or(config::DEFAULT_ROTATION_SPEED);
                Kinematics::Control(ControlState::new(speed, rotation_speed))
            }
        };

        Robot {
            id: self.id,
            hitbox: self.hitbox,
            speed,
            angle: self.angle,
            kinematics,
            dragging: self.dragging,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn kind(&self) -> RobotKind {
        self.kinematics.kind()
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.kinematics
    }

    pub fn hitbox(&self) -> Circle {
        self.hitbox
    }

    pub fn set_hitbox(&mut self, hitbox: Circle) {
        self.hitbox = hitbox;
    }

    pub fn center(&self) -> Vec2 {
        self.hitbox.center()
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.hitbox = self.hitbox.with_center(center);
    }

    pub fn radius(&self) -> f64 {
        self.hitbox.radius()
    }

    /// Width of the outline drawn inside the hitbox.
    pub fn border(&self) -> f64 {
        config::ROBOT_BORDER
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Unit vector along the current heading.
    pub fn heading(&self) -> Vec2 {
        Vec2::unit(self.angle)
    }

    /// The speed the robot intends to drive at. A turning auto robot and
    /// an idle control robot hold their raw speed at zero; this reports
    /// the remembered speed instead.
    pub fn speed(&self) -> f64 {
        match &self.kinematics {
            Kinematics::Auto(state) if state.is_turning() => state.saved_speed,
            Kinematics::Control(state) if !state.is_driving() => state.base_speed,
            _ => self.speed,
        }
    }

    /// Sets the intended speed, writing through to the remembered speed
    /// where [`Robot::speed`] reads from it.
    pub fn set_speed(&mut self, speed: f64) {
        match &mut self.kinematics {
            Kinematics::Auto(state) if state.is_turning() => state.saved_speed = speed,
            Kinematics::Control(state) => {
                state.base_speed = speed;
                if state.is_driving() {
                    state.current_speed = speed;
                    self.speed = speed;
                }
            }
            _ => self.speed = speed,
        }
    }

    /// The speed actually applied on the next displacement.
    pub fn raw_speed(&self) -> f64 {
        self.speed
    }

    /// Rotation speed of the auto and control variants.
    pub fn rotation_speed(&self) -> Option<f64> {
        match &self.kinematics {
            Kinematics::Dummy => None,
            Kinematics::Auto(state) => Some(state.rotation_speed),
            Kinematics::Control(state) => Some(state.rotation_speed),
        }
    }

    pub fn set_rotation_speed(&mut self, rotation_speed: f64) -> bool {
        match &mut self.kinematics {
            Kinematics::Dummy => false,
            Kinematics::Auto(state) => {
                state.rotation_speed = rotation_speed;
                true
            }
            Kinematics::Control(state) => {
                state.rotation_speed = rotation_speed;
                true
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Forwards a steering edge to a control robot. Other variants ignore it.
    pub fn steer(&mut self, command: Steer, start: bool) -> bool {
        match &mut self.kinematics {
            Kinematics::Control(state) => {
                state.steer(command, start);
                crate::debug_robot!(
                    self.id => "steer {:?} {} -> speed {:.2}, rotation {:.3}",
                    command,
                    if start { "start" } else { "stop" },
                    state.current_speed,
                    state.current_rotation_speed
                );
                true
            }
            _ => false,
        }
    }

    /// Advances the robot by `dt` seconds. `lookahead` is the free distance
    /// in front of the robot as computed by the arena before this move.
    pub fn advance(&mut self, dt: f64, lookahead: f64) {
        match &mut self.kinematics {
            Kinematics::Dummy => {}
            Kinematics::Auto(state) => {
                // A zero turn would never finish and strand the robot at speed 0
                if !state.is_turning() && lookahead <= state.elide_distance && state.elide_rotation != 0.0 {
                    state.rotation_remaining = state.elide_rotation;
                    state.saved_speed = self.speed;
                    self.speed = 0.0;
                    crate::debug_robot!(
                        self.id => "elide at lookahead {:.2}, turning {:.3} rad",
                        lookahead,
                        state.elide_rotation
                    );
                }

                if state.is_turning() {
                    let remaining = state.rotation_remaining;
                    let mut step = (state.rotation_speed * dt).abs().copysign(remaining);
                    if remaining.abs() <= step.abs() {
                        step = remaining;
                        state.rotation_remaining = 0.0;
                        self.speed = state.saved_speed;
                        crate::debug_robot!(self.id => "turn complete, resuming at {:.2}", self.speed);
                    } else {
                        state.rotation_remaining -= step;
                    }
                    self.angle += step;
                }
            }
            Kinematics::Control(state) => {
                // While idle the intended speed lives in base_speed
                self.speed = if state.is_driving() {
                    state.current_speed
                } else {
                    0.0
                };
                self.angle += state.current_rotation_speed * dt;
            }
        }

        let displacement = Vec2::polar(self.speed, self.angle) * dt;
        self.hitbox = self.hitbox.move_by(displacement);
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.center();
        write!(
            f,
            "{} #{} at [{:.1}, {:.1}] speed {:.2} angle {:.3}",
            self.kind().keyword(),
            self.id,
            c.x,
            c.y,
            self.speed(),
            self.angle
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_dummy_moves_along_heading() {
        let mut robot = Robot::new(Vec2::new(100.0, 100.0), 20.0, 0.0);
        robot.advance(1.0, f64::INFINITY);
        assert_approx_eq!(robot.center().x, 120.0);
        assert_approx_eq!(robot.center().y, 100.0);

        // Positive angle turns toward +y (down the screen)
        let mut down = Robot::new(Vec2::new(0.0, 0.0), 10.0, PI / 2.0);
        down.advance(0.5, 0.0);
        assert_approx_eq!(down.center().x, 0.0);
        assert_approx_eq!(down.center().y, 5.0);
    }

    #[test]
    fn test_negative_speed_reverses() {
        let mut robot = Robot::new(Vec2::new(100.0, 100.0), -10.0, 0.0);
        robot.advance(1.0, f64::INFINITY);
        assert_approx_eq!(robot.center().x, 90.0);
    }

    #[test]
    fn test_auto_drives_when_clear() {
        let mut robot = Robot::auto(Vec2::new(0.0, 0.0), 20.0, 0.0, 20.0, PI / 2.0, PI / 4.0);
        robot.advance(1.0, 100.0);
        assert_approx_eq!(robot.center().x, 20.0);
        assert_eq!(robot.angle(), 0.0);
    }

    #[test]
    fn test_auto_elide_episode() {
        let erot = PI / std::f64::consts::E;
        let rspeed = PI / 4.0;
        let mut robot = Robot::auto(Vec2::new(0.0, 0.0), 20.0, 0.0, 20.0, erot, rspeed);

        // Obstacle within the elide distance starts the turn
        robot.advance(0.1, 10.0);
        let Kinematics::Auto(state) = robot.kinematics() else {
            panic!("expected auto robot");
        };
        assert!(state.is_turning());
        assert_eq!(robot.raw_speed(), 0.0);
        assert_eq!(robot.speed(), 20.0, "speed must not read as zero while turning");
        assert_eq!(robot.center(), Vec2::new(0.0, 0.0), "no translation while turning");

        let mut ticks = 1;
        while matches!(robot.kinematics(), Kinematics::Auto(s) if s.is_turning()) {
            assert_eq!(robot.speed(), 20.0);
            robot.advance(0.1, f64::INFINITY);
            ticks += 1;
            assert!(ticks < 1000, "turn never completed");
        }

        // Total rotation equals the elide rotation
        assert_approx_eq!(robot.angle(), erot, 1e-12);
        assert_eq!(robot.raw_speed(), 20.0);
        // erot / (rspeed * dt) = 14.7 steps, so the last one is clamped
        assert_eq!(ticks, 15);
    }

    #[test]
    fn test_auto_negative_elide_rotation() {
        let mut robot = Robot::auto(Vec2::new(0.0, 0.0), 5.0, 0.0, 20.0, -0.5, 1.0);
        for _ in 0..10 {
            robot.advance(0.1, 0.0);
        }
        // Lookahead stays 0, so a second turn starts immediately after the first
        assert!(robot.angle() < -0.5);
        let mut fresh = Robot::auto(Vec2::new(0.0, 0.0), 5.0, 0.0, 20.0, -0.5, 1.0);
        for _ in 0..5 {
            fresh.advance(0.1, 0.0);
        }
        assert_approx_eq!(fresh.angle(), -0.5, 1e-12);
    }

    #[test]
    fn test_auto_zero_elide_rotation_keeps_driving() {
        let mut robot = Robot::auto(Vec2::new(0.0, 0.0), 10.0, 0.0, 20.0, 0.0, 1.0);
        robot.advance(1.0, 0.0);
        assert_approx_eq!(robot.center().x, 10.0);
        assert_eq!(robot.raw_speed(), 10.0);
    }

    #[test]
    fn test_set_speed_while_turning_redirects() {
        let mut robot = Robot::auto(Vec2::new(0.0, 0.0), 20.0, 0.0, 20.0, 1.0, 0.1);
        robot.advance(0.1, 0.0);
        robot.set_speed(35.0);
        assert_eq!(robot.raw_speed(), 0.0);
        assert_eq!(robot.speed(), 35.0);
        for _ in 0..200 {
            robot.advance(0.1, f64::INFINITY);
        }
        assert_eq!(robot.raw_speed(), 35.0);
    }

    #[test]
    fn test_control_idle_until_forward() {
        let mut robot = Robot::control(Vec2::new(0.0, 0.0), 20.0, 0.0, PI / 4.0);
        robot.advance(1.0, 100.0);
        assert_eq!(robot.center(), Vec2::new(0.0, 0.0));
        assert_eq!(robot.raw_speed(), 0.0);
        assert_eq!(robot.speed(), 20.0);

        robot.steer(Steer::Forward, true);
        robot.advance(1.0, 100.0);
        assert_approx_eq!(robot.center().x, 20.0);

        robot.steer(Steer::Forward, false);
        robot.advance(1.0, 100.0);
        assert_approx_eq!(robot.center().x, 20.0);
        assert_eq!(robot.speed(), 20.0);
    }

    #[test]
    fn test_control_rotation_ratchet() {
        let rs = PI / 4.0;
        let mut state = ControlState::new(20.0, rs);

        state.steer(Steer::Left, true);
        assert_eq!(state.current_rotation_speed(), -rs);
        state.steer(Steer::Left, true); // repeated key press does not exceed the limit
        assert_eq!(state.current_rotation_speed(), -rs);
        state.steer(Steer::Left, false);
        assert_eq!(state.current_rotation_speed(), 0.0);

        state.steer(Steer::Right, true);
        assert_eq!(state.current_rotation_speed(), rs);
        state.steer(Steer::Left, true);
        assert_eq!(state.current_rotation_speed(), 0.0);
        state.steer(Steer::Right, false);
        assert_eq!(state.current_rotation_speed(), 0.0);
    }

    #[test]
    fn test_control_turns_while_idle() {
        let mut robot = Robot::control(Vec2::new(0.0, 0.0), 20.0, 0.0, 1.0);
        robot.steer(Steer::Right, true);
        robot.advance(0.5, 100.0);
        assert_approx_eq!(robot.angle(), 0.5);
        assert_eq!(robot.center(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_steer_ignored_by_other_variants() {
        let mut robot = Robot::new(Vec2::new(0.0, 0.0), 1.0, 0.0);
        assert!(!robot.steer(Steer::Forward, true));
    }

    #[test]
    fn test_with_kind_carries_shared_fields() {
        let mut auto = Robot::auto(Vec2::new(10.0, 20.0), 15.0, 1.0, 30.0, 0.7, 0.3);
        auto.advance(0.1, 0.0); // mid-turn: raw speed is 0

        let control = auto.with_kind(RobotKind::Control);
        assert_eq!(control.kind(), RobotKind::Control);
        assert_eq!(control.center(), auto.center());
        assert_eq!(control.speed(), 15.0);
        assert_eq!(control.angle(), auto.angle());
        assert_eq!(control.rotation_speed(), Some(0.3));

        let back = control.with_kind(RobotKind::Auto);
        let Kinematics::Auto(state) = back.kinematics() else {
            panic!("expected auto robot");
        };
        assert_eq!(state.rotation_speed, 0.3);
        assert_eq!(state.elide_distance, config::DEFAULT_ELIDE_DISTANCE);
        assert!(!state.is_turning());
        assert_eq!(back.speed(), 15.0);

        let auto_again = auto.with_kind(RobotKind::Auto);
        let Kinematics::Auto(state) = auto_again.kinematics() else {
            panic!("expected auto robot");
        };
        assert_eq!(state.elide_distance, 30.0);
        assert_eq!(state.elide_rotation, 0.7);

        let dummy = auto.with_kind(RobotKind::Dummy);
        assert_eq!(dummy.rotation_speed(), None);
        assert_eq!(dummy.raw_speed(), 15.0);
    }

    #[test]
    fn test_placed_defaults() {
        let robot = Robot::placed(RobotKind::Auto, Vec2::new(300.0, 100.0));
        assert_eq!(robot.speed(), config::DEFAULT_SPEED);
        assert_eq!(robot.angle(), config::DEFAULT_ANGLE);
        assert_eq!(robot.radius(), config::ROBOT_RADIUS);
        assert_eq!(robot.rotation_speed(), Some(config::DEFAULT_ROTATION_SPEED));
    }

    #[test]
    fn test_kind_keywords() {
        for kind in RobotKind::ALL {
            assert_eq!(RobotKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(RobotKind::from_keyword("tank"), None);
    }
}
