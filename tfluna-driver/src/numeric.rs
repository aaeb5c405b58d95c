use crate::constants::{DEGREES_PER_SECOND_PER_RPM, FULL_TURN_DEGREES};

pub(crate) fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

/// Degrees the head turns between two consecutive distance samples.
pub(crate) fn rpm_to_angle_step(rpm: f64, sample_rate_hz: f64) -> f64 {
    (rpm * DEGREES_PER_SECOND_PER_RPM) / sample_rate_hz
}

/// Wraps `degree` into `[0, 360)`, also for negative inputs.
/// Non-finite input maps to 0.
pub(crate) fn wrap_degrees(degree: f64) -> f64 {
    if !degree.is_finite() {
        return 0.;
    }
    let wrapped = degree.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN_DEGREES {
        0.
    } else {
        wrapped
    }
}

/// Projects a reading taken at `angle_degree` into the plane, shifting it
/// outwards by `offset` along the same ray.
pub(crate) fn to_cartesian(distance: f64, angle_degree: f64, offset: f64) -> (f64, f64) {
    let rad = degree_to_radian(angle_degree);
    let (sin, cos) = rad.sin_cos();
    let sensor_x = offset * cos;
    let sensor_y = offset * sin;
    (sensor_x + distance * cos, sensor_y + distance * sin)
}
