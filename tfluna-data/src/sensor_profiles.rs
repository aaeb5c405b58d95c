use crate::config::{DistanceUnit, RpmPolicy, SensorConfig};

/// Known deployments of the spinning TF-Luna scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorProfile {
    /// Full visualiser: offset-corrected head on a fast UART link.
    Visualizer,
    /// Bare head with no offset correction on a 115200 baud link.
    Basic,
}

pub fn profile_baud_rate(profile: SensorProfile) -> u32 {
    match profile {
        SensorProfile::Visualizer => 250_000,
        SensorProfile::Basic => 115_200,
    }
}

pub fn profile_config(profile: SensorProfile) -> SensorConfig {
    match profile {
        SensorProfile::Visualizer => SensorConfig::default(),
        SensorProfile::Basic => SensorConfig {
            sample_rate_hz: 240.,
            sensor_offset: 0.,
            max_valid_distance: 800,
            point_buffer_capacity: 500,
            distance_unit: DistanceUnit::Centimeters,
            rpm_policy: RpmPolicy::Permissive,
        },
    }
}
