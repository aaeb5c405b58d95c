#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear unit of the distances the sensor reports. Fixed per deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DistanceUnit {
    #[default]
    Centimeters,
    Millimeters,
}

impl DistanceUnit {
    pub fn label(&self) -> &'static str {
        match self {
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Millimeters => "mm",
        }
    }
}

/// What to do with the rotation speed carried by an index pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RpmPolicy {
    /// Accept any reported value, including negative ones.
    #[default]
    Permissive,
    /// Clamp the reported value into `[min, max]`. Bounds that are NaN or
    /// out of order leave the value untouched.
    Clamp { min: f64, max: f64 },
}

impl RpmPolicy {
    pub fn apply(&self, rpm: f64) -> f64 {
        match *self {
            RpmPolicy::Permissive => rpm,
            RpmPolicy::Clamp { min, max } if min <= max => rpm.clamp(min, max),
            RpmPolicy::Clamp { .. } => rpm,
        }
    }
}

/// Constants the scan assembler depends on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    /// Distance readings the sensor emits per second.
    pub sample_rate_hz: f64,
    /// Distance between the sensor element and the rotation center.
    pub sensor_offset: f64,
    /// Largest distance kept. Zero and negative readings are always dropped.
    pub max_valid_distance: i64,
    /// Number of points kept for display.
    pub point_buffer_capacity: usize,
    pub distance_unit: DistanceUnit,
    pub rpm_policy: RpmPolicy,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            sample_rate_hz: 240.,
            sensor_offset: 3.,
            max_valid_distance: 800,
            point_buffer_capacity: 500,
            distance_unit: DistanceUnit::Centimeters,
            rpm_policy: RpmPolicy::Permissive,
        }
    }
}
