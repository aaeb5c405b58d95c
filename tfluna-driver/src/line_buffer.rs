use crate::constants::MAX_PENDING_LINE_BYTES;
use std::collections::VecDeque;

/// Reassembles text lines from arbitrarily split chunks of bytes.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: VecDeque<u8>,
    lines: VecDeque<String>,
}

fn find_line_end(buffer: &VecDeque<u8>) -> Option<usize> {
    buffer.iter().position(|&b| b == b'\n')
}

fn decode(bytes: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(bytes);
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(line.to_string())
}

impl LineBuffer {
    pub fn new() -> LineBuffer {
        LineBuffer::default()
    }

    /// Appends raw bytes and queues every line they complete.
    pub fn extend(&mut self, data: &[u8]) {
        self.pending.extend(data);
        while let Some(end) = find_line_end(&self.pending) {
            let bytes = self.pending.drain(..=end).collect::<Vec<_>>();
            if let Some(line) = decode(&bytes) {
                self.lines.push_back(line);
            }
        }
        if self.pending.len() > MAX_PENDING_LINE_BYTES {
            log::warn!(
                "Discarding {} bytes received without a line terminator",
                self.pending.len()
            );
            self.pending.clear();
        }
    }

    /// Treats whatever is pending as a complete line.
    ///
    /// Used where the transport frames records itself, such as datagrams.
    pub fn finish_line(&mut self) {
        let bytes = self.pending.drain(..).collect::<Vec<_>>();
        if let Some(line) = decode(&bytes) {
            self.lines.push_back(line);
        }
    }

    pub fn pop_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    /// Number of bytes waiting for a terminator.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_lines(&self) -> bool {
        !self.lines.is_empty()
    }
}
