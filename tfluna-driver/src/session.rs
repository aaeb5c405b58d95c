use crate::assembler::ScanAssembler;
use crate::constants::DEFAULT_RENDER_INTERVAL_MS;
use crate::driver_threads::do_terminate;
use crate::error::Result;
use crate::render::ScanRenderer;
use crate::source::LineSource;
use crate::throughput::ThroughputMeter;
use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Time between two renderer polls.
    pub render_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            render_interval: Duration::from_millis(DEFAULT_RENDER_INTERVAL_MS),
        }
    }
}

/// What a finished session processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines: u64,
    pub points: u64,
    pub frames: u64,
}

/// Feeds every line available before `deadline` into the assembler.
///
/// Returns the number of lines consumed. Stops early at the deadline so a
/// fast stream cannot starve the renderer.
pub(crate) fn drain_available<S: LineSource + ?Sized>(
    source: &mut S,
    assembler: &mut ScanAssembler,
    deadline: Instant,
) -> Result<u64> {
    let mut n_lines = 0;
    while let Some(line) = source.next_line()? {
        assembler.handle_line(&line);
        n_lines += 1;
        if Instant::now() >= deadline {
            break;
        }
    }
    Ok(n_lines)
}

/// Runs the read → assemble → render cycle on the calling thread.
///
/// Every `render_interval` the renderer receives a fresh snapshot. The loop
/// ends with `Ok` when `true` arrives on `terminator_rx` (or its sender is
/// gone), and with `Err` when the transport fails. `source` is dropped, and
/// so released, on every path out of this function.
pub fn run_session<S, R>(
    mut source: S,
    assembler: &mut ScanAssembler,
    renderer: &mut R,
    terminator_rx: &Receiver<bool>,
    config: &SessionConfig,
) -> Result<SessionSummary>
where
    S: LineSource,
    R: ScanRenderer + ?Sized,
{
    let stats_at_start = assembler.stats();
    let mut meter = ThroughputMeter::default();
    let mut frames = 0;
    log::info!("Session started");

    while !do_terminate(terminator_rx) {
        let cycle_start = Instant::now();
        let deadline = cycle_start + config.render_interval;

        match drain_available(&mut source, assembler, deadline) {
            Ok(n_lines) => meter.record(n_lines),
            Err(e) => {
                log::error!("Transport failed, ending session: {e}");
                return Err(e);
            }
        }

        renderer.render(&assembler.snapshot())?;
        frames += 1;
        meter.tick();

        let remaining = config.render_interval.saturating_sub(cycle_start.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }

    let stats = assembler.stats();
    let summary = SessionSummary {
        lines: stats.lines - stats_at_start.lines,
        points: stats.accepted_samples() - stats_at_start.accepted_samples(),
        frames,
    };
    log::info!(
        "Session stopped after {} lines, {} points, {} frames",
        summary.lines,
        summary.points,
        summary.frames
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::source::MemoryLineSource;
    use crossbeam_channel::{bounded, Sender};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tfluna_data::{ScanSnapshot, SensorConfig};

    struct StopAfter {
        frames: Vec<ScanSnapshot>,
        limit: usize,
        terminator_tx: Sender<bool>,
    }

    impl ScanRenderer for StopAfter {
        fn render(&mut self, snapshot: &ScanSnapshot) -> Result<()> {
            self.frames.push(snapshot.clone());
            if self.frames.len() == self.limit {
                self.terminator_tx.send(true).unwrap();
            }
            Ok(())
        }
    }

    /// Yields its lines, then fails like an unplugged cable.
    struct UnpluggedSource {
        inner: MemoryLineSource,
        released: Arc<AtomicBool>,
    }

    impl LineSource for UnpluggedSource {
        fn next_line(&mut self) -> Result<Option<String>> {
            if self.inner.is_empty() {
                return Err(ScanError::Disconnected("cable unplugged".to_string()));
            }
            self.inner.next_line()
        }
    }

    impl Drop for UnpluggedSource {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn fast_session() -> SessionConfig {
        SessionConfig {
            render_interval: Duration::from_millis(5),
        }
    }

    fn assembler() -> ScanAssembler {
        ScanAssembler::new(SensorConfig {
            sensor_offset: 0.,
            ..SensorConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_session_renders_and_stops() {
        let (terminator_tx, terminator_rx) = bounded(10);
        let source = MemoryLineSource::new(["R:600", "D:100", "D:100", "R:abc", "D:100"]);
        let mut assembler = assembler();
        let mut renderer = StopAfter {
            frames: Vec::new(),
            limit: 2,
            terminator_tx,
        };

        let summary = run_session(
            source,
            &mut assembler,
            &mut renderer,
            &terminator_rx,
            &fast_session(),
        )
        .unwrap();

        assert_eq!(summary.lines, 5);
        assert_eq!(summary.points, 3);
        assert_eq!(summary.frames, 2);

        let last = renderer.frames.last().unwrap();
        assert_eq!(last.len(), 3);
        assert_eq!(last.rpm, 600.);
    }

    #[test]
    fn test_session_renders_without_data() {
        let (terminator_tx, terminator_rx) = bounded(10);
        let mut assembler = assembler();
        let mut renderer = StopAfter {
            frames: Vec::new(),
            limit: 3,
            terminator_tx,
        };

        let summary = run_session(
            MemoryLineSource::default(),
            &mut assembler,
            &mut renderer,
            &terminator_rx,
            &fast_session(),
        )
        .unwrap();

        assert_eq!(summary.frames, 3);
        assert!(renderer.frames.iter().all(|f| f.is_empty() && f.rpm == 0.));
    }

    #[test]
    fn test_session_stops_when_terminator_dropped() {
        let (terminator_tx, terminator_rx) = bounded::<bool>(10);
        drop(terminator_tx);
        let mut assembler = assembler();
        let mut renderer = |_: &ScanSnapshot| -> Result<()> { Ok(()) };

        let summary = run_session(
            MemoryLineSource::new(["D:1"]),
            &mut assembler,
            &mut renderer,
            &terminator_rx,
            &fast_session(),
        )
        .unwrap();
        assert_eq!(summary, SessionSummary::default());
    }

    #[test]
    fn test_transport_failure_ends_session_and_releases_source() {
        let (_terminator_tx, terminator_rx) = bounded::<bool>(10);
        let released = Arc::new(AtomicBool::new(false));
        let source = UnpluggedSource {
            inner: MemoryLineSource::new(["R:600", "D:100"]),
            released: Arc::clone(&released),
        };
        let mut assembler = assembler();
        let mut renderer = |_: &ScanSnapshot| -> Result<()> { Ok(()) };

        let result = run_session(
            source,
            &mut assembler,
            &mut renderer,
            &terminator_rx,
            &fast_session(),
        );

        assert!(matches!(result, Err(ScanError::Disconnected(_))));
        assert!(released.load(Ordering::SeqCst));
        // lines read before the failure were still assembled
        assert_eq!(assembler.points().len(), 1);
    }

    #[test]
    fn test_render_error_ends_session() {
        let (_terminator_tx, terminator_rx) = bounded::<bool>(10);
        let mut assembler = assembler();
        let mut renderer =
            |_: &ScanSnapshot| -> Result<()> { Err(ScanError::Render("window closed".to_string())) };

        let result = run_session(
            MemoryLineSource::default(),
            &mut assembler,
            &mut renderer,
            &terminator_rx,
            &fast_session(),
        );
        assert!(matches!(result, Err(ScanError::Render(_))));
    }
}
