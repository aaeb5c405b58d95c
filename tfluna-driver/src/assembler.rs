use crate::config::validate_config;
use crate::error::Result;
use crate::numeric::{rpm_to_angle_step, to_cartesian, wrap_degrees};
use crate::parser::parse_line;
use crate::point_buffer::PointBuffer;
use log::{debug, trace, warn};
use tfluna_data::{LineEvent, Point, RotationState, ScanSnapshot, SensorConfig};

/// Counters kept by [`ScanAssembler`] since creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssemblerStats {
    /// Lines handed to [`ScanAssembler::handle_line`].
    pub lines: u64,
    pub speed_updates: u64,
    /// Distance samples seen, accepted or not.
    pub samples: u64,
    /// Distance samples outside `(0, max_valid_distance]`.
    pub rejected_samples: u64,
    /// Lines that were not a well-formed speed update or distance sample.
    pub dropped_lines: u64,
}

impl AssemblerStats {
    pub fn accepted_samples(&self) -> u64 {
        self.samples - self.rejected_samples
    }
}

/// Turns protocol events into points.
///
/// Owns the rotation state and the point buffer. Nothing else mutates them;
/// renderers only ever see a [`ScanSnapshot`].
pub struct ScanAssembler {
    config: SensorConfig,
    rotation: RotationState,
    points: PointBuffer,
    stats: AssemblerStats,
}

impl ScanAssembler {
    pub fn new(config: SensorConfig) -> Result<ScanAssembler> {
        validate_config(&config)?;
        let points = PointBuffer::new(config.point_buffer_capacity);
        Ok(ScanAssembler {
            config,
            rotation: RotationState::default(),
            points,
            stats: AssemblerStats::default(),
        })
    }

    /// Parses and applies one raw line. Returns what the line was parsed as.
    pub fn handle_line(&mut self, line: &str) -> LineEvent {
        self.stats.lines += 1;
        let event = parse_line(line);
        if event == LineEvent::Unrecognized {
            self.stats.dropped_lines += 1;
            trace!("Dropped line {:?}", line);
        }
        self.handle_event(event);
        event
    }

    pub fn handle_event(&mut self, event: LineEvent) {
        match event {
            LineEvent::SpeedUpdate { rpm } => self.apply_speed_update(rpm),
            LineEvent::DistanceSample { distance } => {
                self.apply_distance_sample(distance);
            }
            LineEvent::Unrecognized => (),
        }
    }

    /// Index pulse: adopt the new speed and restart the revolution at 0°.
    pub fn apply_speed_update(&mut self, rpm: f64) {
        let rpm = self.config.rpm_policy.apply(rpm);
        self.rotation.rpm = rpm;
        let angle_step = rpm_to_angle_step(rpm, self.config.sample_rate_hz);
        // rpm near f64::MAX overflows the step; treat it as stalled
        self.rotation.angle_step = if angle_step.is_finite() {
            angle_step
        } else {
            warn!("Angle step for {} rpm is not finite, holding heading", rpm);
            0.
        };
        self.rotation.angle = 0.;
        self.stats.speed_updates += 1;
        debug!(
            "Index pulse: {:.1} rpm, {:.3} deg/sample",
            rpm, self.rotation.angle_step
        );
    }

    /// Places one reading at the current heading and advances the heading.
    ///
    /// Returns the stored point, or `None` when the reading was rejected.
    /// The heading advances in both cases so later readings stay aligned.
    pub fn apply_distance_sample(&mut self, distance: i64) -> Option<Point> {
        self.stats.samples += 1;
        let point = if self.is_valid_distance(distance) {
            let (x, y) = to_cartesian(
                distance as f64,
                self.rotation.angle,
                self.config.sensor_offset,
            );
            let point = Point::new(x, y);
            self.points.push(point);
            Some(point)
        } else {
            self.stats.rejected_samples += 1;
            trace!(
                "Rejected distance {} at {:.2} deg",
                distance,
                self.rotation.angle
            );
            None
        };
        self.rotation.angle = wrap_degrees(self.rotation.angle + self.rotation.angle_step);
        point
    }

    fn is_valid_distance(&self, distance: i64) -> bool {
        distance > 0 && distance <= self.config.max_valid_distance
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn rpm(&self) -> f64 {
        self.rotation.rpm
    }

    pub fn points(&self) -> &PointBuffer {
        &self.points
    }

    pub fn stats(&self) -> AssemblerStats {
        self.stats
    }

    /// Copies the current points and speed for a renderer.
    pub fn snapshot(&self) -> ScanSnapshot {
        ScanSnapshot {
            points: self.points.to_vec(),
            rpm: self.rotation.rpm,
        }
    }
}
