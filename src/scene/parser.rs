// Scene parser: turns scene text into obstacles and robots without touching any arena

use super::Scene;
use super::error::LoadError;
use super::lexer::{Lexer, Spanned, Token};
use crate::config;
use crate::geometry::{Rect, Vec2};
use crate::obstacle::Obstacle;
use crate::robot::{Robot, RobotKind};
use crate::utils::{deg_to_rad, heading_from_degrees};

/// Parses a whole scene. Either every record is valid and the scene is
/// returned, or nothing is and the first problem is reported.
pub fn parse_scene(src: &str) -> Result<Scene, LoadError> {
    let mut parser = Parser::new(src)?;
    let mut scene = Scene::default();

    loop {
        let record = parser.current.clone();
        let name = match record.token {
            Token::Eof => break,
            Token::Ident(name) => name,
            _ => return Err(parser.unexpected("record name")),
        };
        parser.advance()?;

        match name.as_str() {
            "room" => {
                if scene.size.is_some() {
                    return Err(LoadError::DuplicateField {
                        name,
                        offset: record.offset,
                        line: record.line,
                    });
                }
                scene.size = Some(parser.size()?);
            }
            "obstacle" => scene.obstacles.push(parser.obstacle()?),
            other => match RobotKind::from_keyword(other) {
                Some(kind) => scene.robots.push(parser.robot(kind)?),
                None => {
                    return Err(LoadError::UnknownIdentifier {
                        name,
                        offset: record.offset,
                        line: record.line,
                    });
                }
            },
        }
    }

    crate::debug_scene!(
        "parsed {} obstacles and {} robots",
        scene.obstacles.len(),
        scene.robots.len()
    );
    Ok(scene)
}

// Robot attributes in runtime units, starting from the loader defaults
struct RobotAttributes {
    speed: f64,
    angle: f64,
    rotation_speed: f64,
    elide_distance: f64,
    elide_rotation: f64,
    seen: Vec<&'static str>,
}

impl Default for RobotAttributes {
    fn default() -> Self {
        RobotAttributes {
            speed: config::LOAD_DEFAULT_SPEED,
            angle: heading_from_degrees(config::LOAD_DEFAULT_ANGLE_DEG),
            rotation_speed: config::DEFAULT_ROTATION_SPEED,
            elide_distance: config::DEFAULT_ELIDE_DISTANCE,
            elide_rotation: config::DEFAULT_ELIDE_ROTATION,
            seen: Vec::new(),
        }
    }
}

impl RobotAttributes {
    fn build(&self, kind: RobotKind, center: Vec2) -> Robot {
        match kind {
            RobotKind::Dummy => Robot::new(center, self.speed, self.angle),
            RobotKind::Auto => Robot::auto(
                center,
                self.speed,
                self.angle,
                self.elide_distance,
                self.elide_rotation,
                self.rotation_speed,
            ),
            RobotKind::Control => Robot::control(center, self.speed, self.angle, self.rotation_speed),
        }
    }
}

/// Maps an attribute name to its canonical spelling, if `kind` has it.
fn canonical_attribute(kind: RobotKind, name: &str) -> Option<&'static str> {
    match (kind, name) {
        (_, "speed") => Some("speed"),
        (_, "angle") => Some("angle"),
        (RobotKind::Auto | RobotKind::Control, "rotation_speed") => Some("rotation_speed"),
        (RobotKind::Auto, "elide_distance" | "elide_dist") => Some("elide_distance"),
        (RobotKind::Auto, "elide_rotation" | "elide_rot") => Some("elide_rotation"),
        _ => None,
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Spanned,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Result<Self, LoadError> {
        let mut lexer = Lexer::new(src);
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    fn advance(&mut self) -> Result<Spanned, LoadError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn unexpected(&self, expected: &'static str) -> LoadError {
        let Spanned { token, offset, line } = &self.current;
        match token {
            Token::Eof => LoadError::UnexpectedEof {
                expected,
                offset: *offset,
                line: *line,
            },
            found => LoadError::UnexpectedToken {
                expected,
                found: found.to_string(),
                offset: *offset,
                line: *line,
            },
        }
    }

    fn number(&mut self, expected: &'static str) -> Result<f64, LoadError> {
        match self.current.token {
            Token::Number(value) => {
                self.advance()?;
                Ok(value)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn separator(&mut self, token: Token, separator: char) -> Result<(), LoadError> {
        if self.current.token == token {
            self.advance()?;
            return Ok(());
        }
        Err(match self.current.token {
            Token::Eof => self.unexpected("separator"),
            _ => LoadError::MissingSeparator {
                separator,
                offset: self.current.offset,
                line: self.current.line,
            },
        })
    }

    // `<w> x <h>`
    fn size(&mut self) -> Result<Vec2, LoadError> {
        let width = self.number("width")?;
        self.separator(Token::X, 'x')?;
        let height = self.number("height")?;
        Ok(Vec2::new(width, height))
    }

    /// Runs `body` for a bracketed block opened by the current token,
    /// reporting running off the end of input as an unterminated block.
    fn block<T>(
        &mut self,
        what: &'static str,
        body: impl FnOnce(&mut Self) -> Result<T, LoadError>,
    ) -> Result<T, LoadError> {
        let open = self.advance()?;
        body(self).map_err(|err| match err {
            LoadError::UnexpectedEof { .. } => LoadError::Unterminated {
                what,
                offset: open.offset,
                line: open.line,
            },
            other => other,
        })
    }

    // `[ <x> , <y> ]`
    fn position(&mut self) -> Result<Vec2, LoadError> {
        self.block("position", |p| {
            let x = p.number("x coordinate")?;
            p.separator(Token::Comma, ',')?;
            let y = p.number("y coordinate")?;
            match p.current.token {
                Token::PosEnd => {
                    p.advance()?;
                    Ok(Vec2::new(x, y))
                }
                _ => Err(p.unexpected("']'")),
            }
        })
    }

    fn duplicate(&self, name: &str) -> LoadError {
        LoadError::DuplicateField {
            name: name.to_string(),
            offset: self.current.offset,
            line: self.current.line,
        }
    }

    // Size and position, in either order
    fn obstacle(&mut self) -> Result<Obstacle, LoadError> {
        let mut size = None;
        let mut pos = None;
        while size.is_none() || pos.is_none() {
            match self.current.token {
                Token::Number(_) if size.is_some() => return Err(self.duplicate("size")),
                Token::Number(_) => size = Some(self.size()?),
                Token::PosStart if pos.is_some() => return Err(self.duplicate("position")),
                Token::PosStart => pos = Some(self.position()?),
                _ => return Err(self.unexpected("obstacle size or position")),
            }
        }
        let (Some(size), Some(pos)) = (size, pos) else {
            return Err(self.unexpected("obstacle size or position"));
        };
        Ok(Obstacle::new(Rect::new(pos, size)))
    }

    // Position and an optional attribute block, in either order
    fn robot(&mut self, kind: RobotKind) -> Result<Robot, LoadError> {
        let mut center = None;
        let mut attributes = None;
        loop {
            match self.current.token {
                Token::PosStart if center.is_some() => return Err(self.duplicate("position")),
                Token::PosStart => center = Some(self.position()?),
                Token::OptStart if attributes.is_some() => return Err(self.duplicate("attributes")),
                Token::OptStart => attributes = Some(self.attributes(kind)?),
                _ => break,
            }
        }

        let Some(center) = center else {
            return Err(self.unexpected("robot position"));
        };
        let attributes = attributes.unwrap_or_default();
        Ok(attributes.build(kind, center))
    }

    // `{ name: value, ... }`, trailing comma allowed
    fn attributes(&mut self, kind: RobotKind) -> Result<RobotAttributes, LoadError> {
        self.block("attribute block", |p| {
            let mut attrs = RobotAttributes::default();
            loop {
                let Spanned { token, offset, line } = p.current.clone();
                let name = match token {
                    Token::OptEnd => {
                        p.advance()?;
                        return Ok(attrs);
                    }
                    Token::Ident(name) => name,
                    _ => return Err(p.unexpected("attribute name")),
                };

                let Some(field) = canonical_attribute(kind, &name) else {
                    return Err(LoadError::UnknownAttribute {
                        name,
                        record: kind.keyword(),
                        offset,
                        line,
                    });
                };
                if attrs.seen.contains(&field) {
                    return Err(LoadError::DuplicateField {
                        name: field.to_string(),
                        offset,
                        line,
                    });
                }
                attrs.seen.push(field);
                p.advance()?;

                let value = p.number("attribute value")?;
                match field {
                    "speed" => attrs.speed = value,
                    "angle" => attrs.angle = heading_from_degrees(value),
                    "rotation_speed" => attrs.rotation_speed = deg_to_rad(value),
                    "elide_distance" => attrs.elide_distance = value,
                    _ => attrs.elide_rotation = deg_to_rad(value),
                }

                match p.current.token {
                    Token::Comma => {
                        p.advance()?;
                    }
                    Token::OptEnd => {}
                    Token::Eof => return Err(p.unexpected("'}'")),
                    _ => {
                        return Err(LoadError::MissingSeparator {
                            separator: ',',
                            offset: p.current.offset,
                            line: p.current.line,
                        });
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::Kinematics;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_full_scene() {
        let src = "room: 800x600\n\
                   obstacle: 60x60 [100, 200]\n\
                   obstacle: [10, 20] 30x40\n\
                   robot: [200, 100] { speed: 15, angle: 0 }\n\
                   auto_robot: [300, 100] { elide_dist: 35, elide_rot: 90, rotation_speed: 30, }\n\
                   control_robot: { rotation_speed: 90 } [400.5, -3]\n";
        let scene = parse_scene(src).unwrap();

        assert_eq!(scene.size, Some(Vec2::new(800.0, 600.0)));
        assert_eq!(scene.obstacles.len(), 2);
        assert_eq!(scene.obstacles[1].hitbox(), Rect::from_xywh(10.0, 20.0, 30.0, 40.0));
        assert_eq!(scene.robots.len(), 3);

        let dummy = &scene.robots[0];
        assert_eq!(dummy.kind(), RobotKind::Dummy);
        assert_eq!(dummy.center(), Vec2::new(200.0, 100.0));
        assert_eq!(dummy.speed(), 15.0);
        assert_eq!(dummy.angle(), 0.0);

        match scene.robots[1].kinematics() {
            Kinematics::Auto(state) => {
                assert_eq!(state.elide_distance, 35.0);
                assert_approx_eq!(state.elide_rotation, PI / 2.0);
                assert_approx_eq!(state.rotation_speed, PI / 6.0);
            }
            other => panic!("expected an auto robot, got {:?}", other),
        }

        let control = &scene.robots[2];
        assert_eq!(control.kind(), RobotKind::Control);
        assert_eq!(control.center(), Vec2::new(400.5, -3.0));
        assert_approx_eq!(control.rotation_speed().unwrap(), PI / 2.0);
    }

    #[test]
    fn test_defaults_for_missing_attributes() {
        let scene = parse_scene("auto_robot: [1, 2]").unwrap();
        let robot = &scene.robots[0];
        assert_eq!(robot.speed(), 0.0);
        assert_approx_eq!(robot.angle(), PI / 2.0);
        match robot.kinematics() {
            Kinematics::Auto(state) => {
                assert_eq!(state.elide_distance, config::DEFAULT_ELIDE_DISTANCE);
                assert_eq!(state.elide_rotation, config::DEFAULT_ELIDE_ROTATION);
                assert_eq!(state.rotation_speed, config::DEFAULT_ROTATION_SPEED);
            }
            other => panic!("expected an auto robot, got {:?}", other),
        }
        assert_eq!(scene.size, None);
    }

    #[test]
    fn test_angle_sign_convention() {
        let scene = parse_scene("robot: [0, 0] { angle: 90 }").unwrap();
        assert_approx_eq!(scene.robots[0].angle(), -PI / 2.0);
    }

    #[test]
    fn test_empty_input() {
        let scene = parse_scene(" \n\t").unwrap();
        assert!(scene.obstacles.is_empty() && scene.robots.is_empty());
    }

    #[test]
    fn test_unknown_identifier() {
        let err = parse_scene("robot: [1, 2]\nwall: 10x10 [0, 0]").unwrap_err();
        assert_eq!(
            err,
            LoadError::UnknownIdentifier {
                name: "wall".to_string(),
                offset: 14,
                line: 2
            }
        );
    }

    #[test]
    fn test_attribute_errors() {
        let err = parse_scene("robot: [1, 2] { rotation_speed: 3 }").unwrap_err();
        assert!(matches!(err, LoadError::UnknownAttribute { record: "robot", .. }));

        let err = parse_scene("auto_robot: [1, 2] { elide_dist: 3, elide_distance: 4 }").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateField { ref name, .. } if name == "elide_distance"));

        let err = parse_scene("robot: [1, 2] { speed: 3 angle: 4 }").unwrap_err();
        assert!(matches!(err, LoadError::MissingSeparator { separator: ',', .. }));

        let err = parse_scene("robot: [1, 2] { speed: angle: 4 }").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedToken { expected: "attribute value", .. }));
    }

    #[test]
    fn test_unterminated_blocks() {
        let err = parse_scene("robot: [1, 2] { speed: 3,").unwrap_err();
        assert_eq!(
            err,
            LoadError::Unterminated {
                what: "attribute block",
                offset: 14,
                line: 1
            }
        );

        let err = parse_scene("obstacle: 10x10 [1, ").unwrap_err();
        assert!(matches!(err, LoadError::Unterminated { what: "position", offset: 16, .. }));
    }

    #[test]
    fn test_malformed_records() {
        let err = parse_scene("obstacle: 10 10 [0, 0]").unwrap_err();
        assert!(matches!(err, LoadError::MissingSeparator { separator: 'x', .. }));

        let err = parse_scene("obstacle: 10x10").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { .. }));

        let err = parse_scene("obstacle: 10x10 5x5 [0, 0]").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateField { ref name, .. } if name == "size"));

        let err = parse_scene("control_robot: { speed: 1 }").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedEof { expected: "robot position", .. }));

        let err = parse_scene("room: 10x10 room: 20x20").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateField { ref name, .. } if name == "room"));

        let err = parse_scene("[1, 2]").unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedToken { expected: "record name", .. }));
    }
}
