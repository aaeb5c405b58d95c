use crate::error::{Result, ScanError};
use std::fs;
use std::path::Path;
use tfluna_data::{RpmPolicy, SensorConfig};

/// Rejects configurations the assembler cannot run with.
pub fn validate_config(config: &SensorConfig) -> Result<()> {
    if !config.sample_rate_hz.is_finite() || config.sample_rate_hz <= 0. {
        return Err(ScanError::InvalidConfig(format!(
            "sample_rate_hz must be positive, got {}",
            config.sample_rate_hz
        )));
    }
    if !config.sensor_offset.is_finite() {
        return Err(ScanError::InvalidConfig(format!(
            "sensor_offset must be finite, got {}",
            config.sensor_offset
        )));
    }
    if config.max_valid_distance <= 0 {
        return Err(ScanError::InvalidConfig(format!(
            "max_valid_distance must be positive, got {}",
            config.max_valid_distance
        )));
    }
    if config.point_buffer_capacity == 0 {
        return Err(ScanError::InvalidConfig(
            "point_buffer_capacity must be at least 1".to_string(),
        ));
    }
    if let RpmPolicy::Clamp { min, max } = config.rpm_policy {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ScanError::InvalidConfig(format!(
                "rpm clamp range is empty: [{}, {}]",
                min, max
            )));
        }
    }
    Ok(())
}

/// Parses a JSON sensor configuration. Missing fields take their defaults.
pub fn parse_config(json: &str) -> Result<SensorConfig> {
    let config: SensorConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Loads a JSON sensor configuration from `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SensorConfig> {
    let content = fs::read_to_string(path.as_ref())?;
    let config = parse_config(&content)?;
    log::info!("Loaded sensor configuration from {}", path.as_ref().display());
    Ok(config)
}
