#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the sensor's planar frame.
///
/// Units follow the deployment's distance unit (see [`crate::DistanceUnit`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}
