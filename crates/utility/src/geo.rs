use std::f64::consts::PI;

/// Angle of a segment measured from the positive longitude axis, in radians.
///
/// Takes the atan of the segment's slope and adjusts it into the correct
/// quadrant, so the result covers the full `(-π, π]` range. Vertical
/// segments use a signed-infinity slope instead of dividing by zero.
pub fn heading(delta_longitude: f64, delta_latitude: f64) -> f64 {
    let slope = if delta_longitude == 0.0 {
        if delta_latitude >= 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    } else {
        delta_latitude / delta_longitude
    };

    let angle = slope.atan();
    if delta_longitude < 0.0 {
        // atan only covers quadrants I and IV
        if delta_latitude >= 0.0 {
            angle + PI
        } else {
            angle - PI
        }
    } else {
        angle
    }
}

/// Shortest signed turn from one heading to another, normalized into `[-π, π]`.
pub fn shortest_turn(from: f64, to: f64) -> f64 {
    let raw = to - from;
    if raw > PI {
        raw - 2.0 * PI
    } else if raw < -PI {
        raw + 2.0 * PI
    } else {
        raw
    }
}
