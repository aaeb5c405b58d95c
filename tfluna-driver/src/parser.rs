use crate::constants::{DISTANCE_PREFIX, SPEED_PREFIX};
use std::num::IntErrorKind;
use tfluna_data::LineEvent;

/// Classifies one line of the sensor protocol.
///
/// Surrounding whitespace and leftover `\r` are ignored. A known prefix with
/// a payload that does not parse is reported as [`LineEvent::Unrecognized`],
/// so the caller can drop it without touching any state.
pub fn parse_line(line: &str) -> LineEvent {
    let line = line.trim();
    if let Some(payload) = line.strip_prefix(SPEED_PREFIX) {
        return match parse_rpm(payload) {
            Some(rpm) => LineEvent::SpeedUpdate { rpm },
            None => LineEvent::Unrecognized,
        };
    }
    if let Some(payload) = line.strip_prefix(DISTANCE_PREFIX) {
        return match parse_distance(payload) {
            Some(distance) => LineEvent::DistanceSample { distance },
            None => LineEvent::Unrecognized,
        };
    }
    LineEvent::Unrecognized
}

// Integers beyond i64 saturate: still a sample, rejected by the range filter
fn parse_distance(payload: &str) -> Option<i64> {
    match payload.trim().parse::<i64>() {
        Ok(distance) => Some(distance),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

// NaN or infinite speeds would poison every angle until the next pulse
fn parse_rpm(payload: &str) -> Option<f64> {
    payload
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|rpm| rpm.is_finite())
}
