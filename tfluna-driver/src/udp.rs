use crate::constants::{DEFAULT_UDP_PORT, MAX_DATAGRAM_SIZE, UDP_TIMEOUT_MS};
use crate::error::{Result, ScanError};
use crate::line_buffer::LineBuffer;
use crate::serial::is_transient;
use crate::source::LineSource;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

/// Protocol lines received as UDP datagrams, e.g. from a WiFi bridge.
///
/// A datagram may carry several lines. Its end also ends a line.
pub struct UdpLineSource {
    socket: UdpSocket,
    lines: LineBuffer,
    datagram: Vec<u8>,
}

impl UdpLineSource {
    pub fn bind<A: ToSocketAddrs>(addr: A) -> Result<UdpLineSource> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(Duration::from_millis(UDP_TIMEOUT_MS)))?;
        log::info!("Listening for sensor datagrams on {}", socket.local_addr()?);
        Ok(UdpLineSource {
            socket,
            lines: LineBuffer::new(),
            datagram: vec![0; MAX_DATAGRAM_SIZE],
        })
    }

    /// Listens on all interfaces at the bridge's default port.
    pub fn bind_default() -> Result<UdpLineSource> {
        UdpLineSource::bind(("0.0.0.0", DEFAULT_UDP_PORT))
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

impl LineSource for UdpLineSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        if !self.lines.has_lines() {
            match self.socket.recv_from(&mut self.datagram) {
                Ok((n, _)) => {
                    self.lines.extend(&self.datagram[..n]);
                    self.lines.finish_line();
                }
                Err(e) if is_transient(e.kind()) => (),
                Err(e) => return Err(ScanError::Disconnected(e.to_string())),
            }
        }
        Ok(self.lines.pop_line())
    }
}

impl Drop for UdpLineSource {
    fn drop(&mut self) {
        if let Ok(addr) = self.socket.local_addr() {
            log::info!("UDP socket {} closed", addr);
        }
    }
}
