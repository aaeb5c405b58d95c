pub mod config;
pub mod event;
pub mod point;
pub mod rotation;
pub mod sensor_profiles;
pub mod snapshot;

pub use config::{DistanceUnit, RpmPolicy, SensorConfig};
pub use event::LineEvent;
pub use point::Point;
pub use rotation::RotationState;
pub use sensor_profiles::{profile_baud_rate, profile_config, SensorProfile};
pub use snapshot::ScanSnapshot;
