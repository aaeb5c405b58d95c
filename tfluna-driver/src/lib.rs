use std::sync::mpsc;

mod assembler;
mod config;
mod constants;
mod driver_threads;
mod error;
mod line_buffer;
mod numeric;
mod parser;
mod point_buffer;
mod render;
mod serial;
mod session;
mod source;
mod throughput;
mod time;
mod udp;

use crate::constants::SNAPSHOT_CHANNEL_DEPTH;
use crate::driver_threads::assemble_scan;
use crossbeam_channel::bounded;
use tfluna_data::{profile_baud_rate, profile_config, ScanSnapshot, SensorConfig, SensorProfile};

pub use crate::assembler::{AssemblerStats, ScanAssembler};
pub use crate::config::{load_config, parse_config, validate_config};
pub use crate::driver_threads::{join, DriverThreads};
pub use crate::error::{Result, ScanError};
pub use crate::line_buffer::LineBuffer;
pub use crate::parser::parse_line;
pub use crate::point_buffer::PointBuffer;
pub use crate::render::{LogRenderer, ScanRenderer};
pub use crate::serial::{find_serial_port, SerialLineSource};
pub use crate::session::{run_session, SessionConfig, SessionSummary};
pub use crate::source::{LineSource, MemoryLineSource};
pub use crate::throughput::ThroughputMeter;
pub use crate::udp::UdpLineSource;

/// Function to start assembling scans on a background thread.
/// # Arguments
///
/// * `source` - Transport the protocol lines are read from.
/// * `config` - Sensor constants used to place the points.
/// * `session` - How often a snapshot is published.
pub fn run_driver<S>(
    source: S,
    config: SensorConfig,
    session: SessionConfig,
) -> Result<(DriverThreads, mpsc::Receiver<ScanSnapshot>)>
where
    S: LineSource + Send + 'static,
{
    let assembler = ScanAssembler::new(config)?;
    let (terminator_tx, terminator_rx) = bounded(10);
    let (snapshot_tx, snapshot_rx) = mpsc::sync_channel::<ScanSnapshot>(SNAPSHOT_CHANNEL_DEPTH);

    let reader_thread = std::thread::Builder::new()
        .name("tfluna-reader".to_string())
        .spawn(move || assemble_scan(source, assembler, snapshot_tx, terminator_rx, session))?;

    let driver_threads = DriverThreads {
        terminator_tx,
        reader_thread: Some(reader_thread),
    };

    Ok((driver_threads, snapshot_rx))
}

/// Function to launch the driver on a serial port.
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
/// * `profile` - Deployment the port is connected to.
pub fn open_serial_driver(
    port_name: &str,
    profile: SensorProfile,
) -> Result<(DriverThreads, mpsc::Receiver<ScanSnapshot>)> {
    let source = SerialLineSource::open(port_name, profile_baud_rate(profile))?;
    run_driver(source, profile_config(profile), SessionConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tfluna_data::Point;

    fn assert_close(p: &Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-2, "x: {} vs {}", p.x, x);
        assert!((p.y - y).abs() < 1e-2, "y: {} vs {}", p.y, y);
    }

    fn session() -> SessionConfig {
        SessionConfig {
            render_interval: Duration::from_millis(5),
        }
    }

    fn no_offset() -> SensorConfig {
        SensorConfig {
            sensor_offset: 0.,
            ..SensorConfig::default()
        }
    }

    #[test]
    fn test_run_driver_publishes_snapshots() {
        let source = MemoryLineSource::new(["R:600", "D:100", "D:100", "D:100"]);
        let (thread, snapshot_rx) = run_driver(source, no_offset(), session()).unwrap();

        let mut snapshot = snapshot_rx.recv().unwrap();
        while snapshot.len() < 3 {
            snapshot = snapshot_rx.recv().unwrap();
        }

        assert_eq!(snapshot.rpm, 600.);
        assert_close(&snapshot.points[0], 100., 0.);
        assert_close(&snapshot.points[1], 96.59, 25.88);
        assert_close(&snapshot.points[2], 86.60, 50.00);

        drop(thread);
    }

    #[test]
    fn test_run_driver_rejects_invalid_config() {
        let config = SensorConfig {
            point_buffer_capacity: 0,
            ..SensorConfig::default()
        };
        assert!(matches!(
            run_driver(MemoryLineSource::default(), config, session()),
            Err(ScanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_join_stops_thread() {
        let (mut thread, snapshot_rx) =
            run_driver(MemoryLineSource::default(), no_offset(), session()).unwrap();
        assert!(join(&mut thread).is_ok());
        assert!(thread.reader_thread.is_none());

        // the channel closes with the thread
        while snapshot_rx.recv().is_ok() {}
    }

    struct UnpluggedSource;

    impl LineSource for UnpluggedSource {
        fn next_line(&mut self) -> Result<Option<String>> {
            Err(ScanError::Disconnected("unplugged".to_string()))
        }
    }

    #[test]
    fn test_transport_failure_closes_snapshot_channel() {
        let (mut thread, snapshot_rx) =
            run_driver(UnpluggedSource, no_offset(), session()).unwrap();

        // a renderer polling the channel sees it disconnect
        loop {
            match snapshot_rx.try_recv() {
                Ok(_) | Err(mpsc::TryRecvError::Empty) => {
                    std::thread::sleep(Duration::from_millis(1))
                }
                Err(mpsc::TryRecvError::Disconnected) => break,
            }
        }

        assert!(matches!(join(&mut thread), Err(ScanError::Disconnected(_))));
    }

    #[test]
    fn test_open_serial_driver_missing_port() {
        assert!(matches!(
            open_serial_driver("/dev/does-not-exist-tfluna", SensorProfile::Basic),
            Err(ScanError::Serial(_))
        ));
    }
}
