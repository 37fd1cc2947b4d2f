// Unit conversions between the on-disk (degrees) and runtime (radians) conventions

use std::f64::consts::PI;

/// Heading stored in a scene file (degrees, counter-clockwise on screen)
/// to runtime radians (clockwise on screen, since y grows downward).
pub fn heading_from_degrees(degrees: f64) -> f64 {
    -degrees * PI / 180.0
}

/// Inverse of [`heading_from_degrees`].
pub fn heading_to_degrees(radians: f64) -> f64 {
    -radians * 180.0 / PI
}

/// Plain degree to radian conversion, used for rotation speeds and turn
/// amounts which carry no sign flip.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Maps `-0.0` to `0.0` so scene files never contain `-0`.
pub fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
