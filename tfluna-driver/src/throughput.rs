use std::time::{Duration, Instant};

/// Counts received lines and reports the rate once per window.
#[derive(Debug)]
pub struct ThroughputMeter {
    count: u64,
    window: Duration,
    window_start: Instant,
}

impl Default for ThroughputMeter {
    fn default() -> Self {
        ThroughputMeter::with_window(Duration::from_secs(1))
    }
}

impl ThroughputMeter {
    pub fn with_window(window: Duration) -> ThroughputMeter {
        ThroughputMeter {
            count: 0,
            window,
            window_start: Instant::now(),
        }
    }

    pub fn record(&mut self, n_lines: u64) {
        self.count += n_lines;
    }

    /// Closes the window if it has elapsed, returning its line count.
    pub fn tick(&mut self) -> Option<u64> {
        let elapsed = self.window_start.elapsed();
        if elapsed < self.window {
            return None;
        }
        let count = self.count;
        log::info!(
            "Received {} lines in the last {:.1} s",
            count,
            elapsed.as_secs_f64()
        );
        self.count = 0;
        self.window_start = Instant::now();
        Some(count)
    }
}
