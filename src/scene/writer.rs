// Scene writer: one line per record, room first, then obstacles, then robots

use super::Scene;
use crate::robot::{Kinematics, Robot};
use crate::utils::{heading_to_degrees, rad_to_deg, unsigned_zero as num};
use std::fmt::{self, Write};

/// Writes `scene` in the text format read by [`super::parse_scene`]. Every
/// robot attribute is written out, so loading does not rely on defaults.
pub fn write_scene(out: &mut impl Write, scene: &Scene) -> fmt::Result {
    if let Some(size) = scene.size {
        writeln!(out, "room: {}x{}", num(size.x), num(size.y))?;
    }
    for obstacle in &scene.obstacles {
        writeln!(out, "{}", obstacle)?;
    }
    for robot in &scene.robots {
        write_robot(out, robot)?;
    }
    Ok(())
}

fn write_robot(out: &mut impl Write, robot: &Robot) -> fmt::Result {
    let center = robot.center();
    write!(
        out,
        "{}: [{}, {}] {{ speed: {}, angle: {}",
        robot.kind().keyword(),
        num(center.x),
        num(center.y),
        num(robot.speed()),
        num(heading_to_degrees(robot.angle()))
    )?;
    match robot.kinematics() {
        Kinematics::Dummy => {}
        Kinematics::Auto(state) => write!(
            out,
            ", rotation_speed: {}, elide_distance: {}, elide_rotation: {}",
            num(rad_to_deg(state.rotation_speed)),
            num(state.elide_distance),
            num(rad_to_deg(state.elide_rotation))
        )?,
        Kinematics::Control(state) => {
            write!(out, ", rotation_speed: {}", num(rad_to_deg(state.rotation_speed)))?
        }
    }
    writeln!(out, " }}")
}
