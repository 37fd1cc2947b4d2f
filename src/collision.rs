// Positional (push-out) collision resolution and the forward look-ahead ray query.
//
// Everything here is a pure function over geometry values. Degenerate input
// (coincident centers, a corner exactly at a robot's center, rays parallel to
// an edge) resolves to "no displacement" or "no hit" rather than an error.

use crate::geometry::{Circle, Rect, Vec2};

/// Pushes a robot out of an obstacle, returning the corrected hitbox or
/// `None` when nothing needs to change.
///
/// Face contact is checked first: when the robot's center lies strictly
/// within the obstacle's horizontal span it is moved vertically so that
/// its near edge touches the obstacle, and likewise for the vertical span.
/// Otherwise the first obstacle corner found strictly inside the circle
/// pushes the robot straight away from that corner until the corner sits
/// on the circle boundary.
pub fn resolve_obstacle_collision(robot: Circle, obstacle: &Rect) -> Option<Circle> {
    let center = robot.center();
    let radius = robot.radius();
    let horizontal = obstacle.horizontal();
    let vertical = obstacle.vertical();

    if horizontal.range_contains(center.x) {
        if vertical.range_contains(robot.bottom()) {
            return Some(robot.with_center(center.with_y(obstacle.top() - radius)));
        }
        if vertical.range_contains(robot.top()) {
            return Some(robot.with_center(center.with_y(obstacle.bottom() + radius)));
        }
        return None;
    }

    if vertical.range_contains(center.y) {
        if horizontal.range_contains(robot.right()) {
            return Some(robot.with_center(center.with_x(obstacle.left() - radius)));
        }
        if horizontal.range_contains(robot.left()) {
            return Some(robot.with_center(center.with_x(obstacle.right() + radius)));
        }
        return None;
    }

    obstacle
        .corners()
        .into_iter()
        .find(|corner| robot.contains(*corner))
        .map(|corner| {
            let to_corner = corner - center;
            let dist = to_corner.len();
            if dist == 0.0 {
                return robot;
            }
            // Moves the center away so that |center' - corner| == radius
            robot.move_by(to_corner * (1.0 - radius / dist))
        })
}

/// Computes how far two overlapping robots must move apart.
///
/// Returns the displacement to add to `second` (and subtract from
/// `first`), half of the overlap each. `None` when the circles do not
/// overlap. Coincident centers have no separation direction and yield a
/// zero displacement.
pub fn resolve_robot_collision(first: Circle, second: Circle) -> Option<Vec2> {
    let dir = second.center() - first.center();
    let combined_radius = first.radius() + second.radius();
    let dist = dir.len();
    let overlap = combined_radius - dist;

    if overlap <= 0.0 {
        return None;
    }
    if dist == 0.0 {
        return Some(Vec2::ZERO);
    }
    Some(dir * (overlap / (2.0 * dist)))
}

/// Moves a robot so its bounding square lies inside `bounds`. Each axis is
/// clamped independently, the left/top edge taking priority when the robot
/// is larger than the arena. The result is a fixed point: clamping it again
/// changes nothing.
pub fn clamp_to_bounds(robot: Circle, bounds: &Rect) -> Circle {
    let radius = robot.radius();
    let center = robot.center();
    let x = center
        .x
        .min(bounds.right() - radius)
        .max(bounds.left() + radius);
    let y = center
        .y
        .min(bounds.bottom() - radius)
        .max(bounds.top() + radius);
    robot.with_center(Vec2::new(x, y))
}

/// Distance from `origin` along the unit direction `dir` to the segment
/// `a`-`b`, or infinity when the ray misses it.
///
/// The segment endpoints must be ordered so that `a <= b` on the axis the
/// segment spans. A hit must land strictly inside the segment's range on at
/// least one axis, so rays through a corner do not count.
pub fn segment_distance(origin: Vec2, dir: Vec2, a: Vec2, b: Vec2) -> f64 {
    let edge = a - b;
    let denom = dir.cross(edge);
    if denom == 0.0 {
        return f64::INFINITY; // parallel
    }

    let u = (a - origin).cross(dir) / denom;
    let hit = a + edge * u;
    if !hit.x.is_finite() || !hit.y.is_finite() {
        return f64::INFINITY;
    }

    let within_x = Vec2::new(a.x, b.x).range_contains(hit.x);
    let within_y = Vec2::new(a.y, b.y).range_contains(hit.y);
    if !within_x && !within_y {
        return f64::INFINITY;
    }

    let to_hit = hit - origin;
    if dir.dot(to_hit) < 0.0 {
        return f64::INFINITY; // behind
    }
    to_hit.len()
}

/// Shortest ray distance to any of the four edges of `rect`.
pub fn rect_distance(origin: Vec2, dir: Vec2, rect: &Rect) -> f64 {
    rect.edges()
        .into_iter()
        .map(|(a, b)| segment_distance(origin, dir, a, b))
        .fold(f64::INFINITY, f64::min)
}

/// Free distance in front of a robot: the nearest edge hit along the
/// heading among the arena border and `obstacles`, minus the robot's
/// radius and never below zero. Infinity when nothing is hit.
pub fn lookahead(
    robot: &Circle,
    heading: Vec2,
    bounds: &Rect,
    obstacles: impl IntoIterator<Item = Rect>,
) -> f64 {
    let center = robot.center();
    let nearest = obstacles
        .into_iter()
        .map(|rect| rect_distance(center, heading, &rect))
        .fold(rect_distance(center, heading, bounds), f64::min);

    (nearest - robot.radius()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn robot_at(x: f64, y: f64) -> Circle {
        Circle::new(Vec2::new(x, y), 25.0)
    }

    #[test]
    fn test_obstacle_push_up_and_down() {
        let obstacle = Rect::from_xywh(100.0, 200.0, 60.0, 60.0);

        // Above, bottom edge inside the obstacle
        let pushed = resolve_obstacle_collision(robot_at(130.0, 190.0), &obstacle).unwrap();
        assert_eq!(pushed.center(), Vec2::new(130.0, 175.0));
        assert_eq!(pushed.bottom(), obstacle.top());

        // Below, top edge inside the obstacle
        let pushed = resolve_obstacle_collision(robot_at(130.0, 270.0), &obstacle).unwrap();
        assert_eq!(pushed.top(), obstacle.bottom());

        // Within the horizontal span but clear of the obstacle
        assert!(resolve_obstacle_collision(robot_at(130.0, 100.0), &obstacle).is_none());
    }

    #[test]
    fn test_obstacle_push_left_and_right() {
        let obstacle = Rect::from_xywh(100.0, 200.0, 60.0, 60.0);

        let pushed = resolve_obstacle_collision(robot_at(90.0, 230.0), &obstacle).unwrap();
        assert_eq!(pushed.center(), Vec2::new(75.0, 230.0));
        assert_eq!(pushed.right(), obstacle.left());

        let pushed = resolve_obstacle_collision(robot_at(170.0, 230.0), &obstacle).unwrap();
        assert_eq!(pushed.left(), obstacle.right());
    }

    #[test]
    fn test_obstacle_corner_push() {
        let obstacle = Rect::from_xywh(100.0, 200.0, 60.0, 60.0);
        let robot = robot_at(90.0, 190.0); // top-left corner is ~14.1 away
        let pushed = resolve_obstacle_collision(robot, &obstacle).unwrap();
        assert_approx_eq!(pushed.center().distance(obstacle.top_left()), 25.0);

        // Pushed directly away from the corner, along the diagonal
        let dir = pushed.center() - robot.center();
        assert_approx_eq!(dir.x, dir.y);
        assert!(dir.x < 0.0);
    }

    #[test]
    fn test_obstacle_corner_out_of_reach() {
        let obstacle = Rect::from_xywh(100.0, 200.0, 60.0, 60.0);
        assert!(resolve_obstacle_collision(robot_at(80.0, 180.0), &obstacle).is_none());
    }

    #[test]
    fn test_robot_push_apart_head_on() {
        let a = robot_at(100.0, 100.0);
        let b = robot_at(140.0, 100.0);
        let push = resolve_robot_collision(a, b).unwrap();
        assert_approx_eq!(push.x, 5.0);
        assert_approx_eq!(push.y, 0.0);

        let a2 = a.move_by(-push);
        let b2 = b.move_by(push);
        assert_approx_eq!(a2.center().distance(b2.center()), 50.0);
    }

    #[test]
    fn test_robot_push_apart_diagonal() {
        let a = robot_at(0.0, 0.0);
        let b = robot_at(20.0, 20.0);
        let push = resolve_robot_collision(a, b).unwrap();
        let a2 = a.move_by(-push);
        let b2 = b.move_by(push);
        assert!(a2.center().distance(b2.center()) >= 50.0 - 1e-9);
        assert_approx_eq!(push.len(), (a2.center() - a.center()).len());
    }

    #[test]
    fn test_robot_no_overlap() {
        assert!(resolve_robot_collision(robot_at(0.0, 0.0), robot_at(50.0, 0.0)).is_none());
        assert!(resolve_robot_collision(robot_at(0.0, 0.0), robot_at(80.0, 0.0)).is_none());
    }

    #[test]
    fn test_robot_coincident_centers() {
        let push = resolve_robot_collision(robot_at(10.0, 10.0), robot_at(10.0, 10.0));
        assert_eq!(push, Some(Vec2::ZERO));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = Rect::from_xywh(0.0, 0.0, 800.0, 600.0);

        let inside = robot_at(400.0, 300.0);
        assert_eq!(clamp_to_bounds(inside, &bounds), inside);

        let clamped = clamp_to_bounds(robot_at(10.0, 590.0), &bounds);
        assert_eq!(clamped.center(), Vec2::new(25.0, 575.0));

        let clamped = clamp_to_bounds(robot_at(900.0, -40.0), &bounds);
        assert_eq!(clamped.center(), Vec2::new(775.0, 25.0));
    }

    #[test]
    fn test_clamp_idempotent() {
        let bounds = Rect::from_xywh(13.3, 7.1, 640.7, 480.9);
        let starts = [
            (0.0, 0.0),
            (1000.0, 1000.0),
            (300.0, -5.0),
            (-12.25, 333.3),
            (650.1, 470.2),
        ];
        for (x, y) in starts {
            let once = clamp_to_bounds(robot_at(x, y), &bounds);
            let twice = clamp_to_bounds(once, &bounds);
            assert_eq!(once, twice, "start ({}, {})", x, y);
        }
    }

    #[test]
    fn test_clamp_room_smaller_than_robot() {
        // 40x40 room, robot diameter 50: the left/top edges win
        let bounds = Rect::from_xywh(0.0, 0.0, 40.0, 40.0);
        let once = clamp_to_bounds(robot_at(100.0, 100.0), &bounds);
        assert_eq!(once.center(), Vec2::new(25.0, 25.0));
        assert_eq!(clamp_to_bounds(once, &bounds), once);

        let from_top_left = clamp_to_bounds(robot_at(-30.0, -30.0), &bounds);
        assert_eq!(from_top_left, once);
    }

    #[test]
    fn test_segment_distance_hits_and_misses() {
        let origin = Vec2::new(0.0, 0.0);
        let right = Vec2::unit(0.0);

        // Vertical segment ahead
        let d = segment_distance(origin, right, Vec2::new(10.0, -5.0), Vec2::new(10.0, 5.0));
        assert_approx_eq!(d, 10.0);

        // Behind the origin
        let d = segment_distance(origin, right, Vec2::new(-10.0, -5.0), Vec2::new(-10.0, 5.0));
        assert!(d.is_infinite());

        // Parallel
        let d = segment_distance(origin, right, Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0));
        assert!(d.is_infinite());

        // Line hit outside the segment
        let d = segment_distance(origin, right, Vec2::new(10.0, 5.0), Vec2::new(10.0, 15.0));
        assert!(d.is_infinite());
    }

    #[test]
    fn test_rect_distance_diagonal() {
        let rect = Rect::from_xywh(10.0, 10.0, 10.0, 10.0);
        let d = rect_distance(Vec2::new(0.0, 5.0), Vec2::unit(PI / 4.0), &rect);
        // Enters through the left edge at (10, 15)
        assert_approx_eq!(d, (200.0_f64).sqrt());
    }

    #[test]
    fn test_lookahead_scenario() {
        let bounds = Rect::from_xywh(0.0, 0.0, 800.0, 600.0);
        let obstacle = Rect::from_xywh(100.0, 200.0, 60.0, 60.0);

        // Already touching the obstacle's left edge: nothing left in front
        let robot = robot_at(90.0, 230.0);
        assert_eq!(lookahead(&robot, Vec2::unit(0.0), &bounds, [obstacle]), 0.0);

        // Further away the obstacle edge is the nearest hit
        let robot = robot_at(40.0, 230.0);
        assert_approx_eq!(lookahead(&robot, Vec2::unit(0.0), &bounds, [obstacle]), 35.0);

        // Facing away the arena border is hit instead
        let d = lookahead(&robot, Vec2::unit(PI), &bounds, [obstacle]);
        assert_approx_eq!(d, 15.0);
    }

    #[test]
    fn test_lookahead_open_space() {
        // Outside the arena looking away: no edge is ever hit
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let robot = robot_at(500.0, 50.0);
        let d = lookahead(&robot, Vec2::unit(0.0), &bounds, std::iter::empty());
        assert!(d.is_infinite());
    }
}
