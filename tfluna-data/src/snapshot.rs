use crate::point::Point;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only copy of the assembled scan handed to a renderer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanSnapshot {
    /// Points, oldest first.
    pub points: Vec<Point>,
    /// Rotation speed at the time of the snapshot.
    pub rpm: f64,
}

impl ScanSnapshot {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Plot title carrying the current rotation speed.
    pub fn title(&self) -> String {
        format!("LIDAR Point Cloud - {:.1} RPM", self.rpm)
    }
}
