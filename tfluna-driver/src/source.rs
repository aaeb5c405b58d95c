use crate::error::Result;
use std::collections::VecDeque;

/// Produces protocol lines from a transport.
///
/// Implementations must not block for longer than a few milliseconds so
/// the render cadence holds. `Ok(None)` means nothing is available yet; an
/// error means the transport is gone and the session ends.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<String>>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> Result<Option<String>> {
        (**self).next_line()
    }
}

/// Lines held in memory. Used for replays and tests.
#[derive(Debug, Default)]
pub struct MemoryLineSource {
    lines: VecDeque<String>,
}

impl MemoryLineSource {
    pub fn new<I, S>(lines: I) -> MemoryLineSource
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryLineSource {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl LineSource for MemoryLineSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
