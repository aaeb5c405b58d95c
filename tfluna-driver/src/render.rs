use crate::error::Result;
use tfluna_data::ScanSnapshot;

/// Drawing surface polled with the latest scan.
pub trait ScanRenderer {
    fn render(&mut self, snapshot: &ScanSnapshot) -> Result<()>;
}

impl<F> ScanRenderer for F
where
    F: FnMut(&ScanSnapshot) -> Result<()>,
{
    fn render(&mut self, snapshot: &ScanSnapshot) -> Result<()> {
        self(snapshot)
    }
}

/// Writes a one-line summary of each frame to the log.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl ScanRenderer for LogRenderer {
    fn render(&mut self, snapshot: &ScanSnapshot) -> Result<()> {
        log::info!("{} | Points: {}", snapshot.title(), snapshot.len());
        Ok(())
    }
}
