use crate::constants::{SERIAL_TIMEOUT_MS, USB_SERIAL_MARKER};
use crate::error::{Result, ScanError};
use crate::line_buffer::LineBuffer;
use crate::source::LineSource;
use serialport::SerialPort;
use std::io::{ErrorKind, Read};
use std::time::Duration;

/// Protocol lines read from a serial port.
///
/// The port is closed when the source is dropped, whichever way the session
/// ends.
pub struct SerialLineSource {
    port: Box<dyn SerialPort>,
    name: String,
    lines: LineBuffer,
}

impl SerialLineSource {
    /// Opens `port_name` and discards whatever the device sent before.
    ///
    /// # Arguments
    ///
    /// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
    /// * `baud_rate` - Baud rate of the sensor bridge.
    pub fn open(port_name: &str, baud_rate: u32) -> Result<SerialLineSource> {
        let mut port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(SERIAL_TIMEOUT_MS))
            .open()?;
        flush(&mut port)?;
        log::info!("Opened serial port {} at {} baud", port_name, baud_rate);
        Ok(SerialLineSource {
            port,
            name: port_name.to_string(),
            lines: LineBuffer::new(),
        })
    }

    /// Wraps an already opened port.
    pub fn from_port(port: Box<dyn SerialPort>) -> SerialLineSource {
        let name = port.name().unwrap_or_else(|| "<unnamed>".to_string());
        SerialLineSource {
            port,
            name,
            lines: LineBuffer::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl LineSource for SerialLineSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        if !self.lines.has_lines() {
            let data = read_available(&mut self.port)?;
            self.lines.extend(&data);
        }
        Ok(self.lines.pop_line())
    }
}

impl Drop for SerialLineSource {
    fn drop(&mut self) {
        log::info!("Serial port {} closed", self.name);
    }
}

/// Picks a serial port when none was named.
///
/// Lists the available ports, prefers a USB-serial adapter and otherwise
/// takes the first one.
pub fn find_serial_port() -> Result<String> {
    let names: Vec<String> = serialport::available_ports()?
        .into_iter()
        .map(|info| info.port_name)
        .collect();
    log::info!("Available serial ports: {:?}", names);
    match pick_port(&names) {
        Some(name) => {
            log::info!("Using serial port {}", name);
            Ok(name.to_string())
        }
        None => Err(ScanError::NoSerialPort),
    }
}

pub(crate) fn pick_port(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| name.contains(USB_SERIAL_MARKER))
        .or_else(|| names.first())
        .map(String::as_str)
}

pub(crate) fn get_n_read(port: &mut Box<dyn SerialPort>) -> Result<usize> {
    let n_u32: u32 = port.bytes_to_read()?;
    Ok(n_u32.try_into().unwrap_or(0))
}

pub(crate) fn flush(port: &mut Box<dyn SerialPort>) -> Result<()> {
    let discarded = read_available(port)?;
    if !discarded.is_empty() {
        log::debug!("Flushed {} stale bytes", discarded.len());
    }
    Ok(())
}

/// Reads whatever the port has buffered without waiting for more.
pub(crate) fn read_available(port: &mut Box<dyn SerialPort>) -> Result<Vec<u8>> {
    let n_read = get_n_read(port)?;
    if n_read == 0 {
        return Ok(Vec::new());
    }
    let mut data: Vec<u8> = vec![0; n_read];
    match port.read(data.as_mut_slice()) {
        Ok(0) => Err(ScanError::Disconnected(
            "serial port returned end of stream".to_string(),
        )),
        Ok(n) => {
            data.truncate(n);
            Ok(data)
        }
        Err(e) if is_transient(e.kind()) => Ok(Vec::new()),
        Err(e) => Err(ScanError::Io(e)),
    }
}

pub(crate) fn is_transient(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use crate::time::sleep_ms;
    #[cfg(unix)]
    use serialport::TTYPort;
    #[cfg(unix)]
    use std::io::Write;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pick_port() {
        let ports = names(&[
            "/dev/cu.Bluetooth",
            "/dev/cu.usbserial-0001",
            "/dev/cu.usbserial-0002",
        ]);
        assert_eq!(pick_port(&ports), Some("/dev/cu.usbserial-0001"));

        let ports = names(&["/dev/ttyS0", "/dev/ttyACM0"]);
        assert_eq!(pick_port(&ports), Some("/dev/ttyS0"));

        assert_eq!(pick_port(&[]), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_read_lines() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let mut source = SerialLineSource::from_port(Box::new(slave) as Box<dyn SerialPort>);

        assert_eq!(source.next_line().unwrap(), None);

        master.write_all(b"R:600\r\nD:100\nD:2").unwrap();
        sleep_ms(10);

        assert_eq!(source.next_line().unwrap().as_deref(), Some("R:600"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("D:100"));
        assert_eq!(source.next_line().unwrap(), None);

        master.write_all(b"00\n").unwrap();
        sleep_ms(10);
        assert_eq!(source.next_line().unwrap().as_deref(), Some("D:200"));
    }

    #[cfg(unix)]
    #[test]
    fn test_flush() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        master.write_all(b"D:1\nD:2\n").unwrap();

        let mut slave_ptr = Box::new(slave) as Box<dyn SerialPort>;

        sleep_ms(10);

        assert_eq!(get_n_read(&mut slave_ptr).unwrap(), 8);
        flush(&mut slave_ptr).unwrap();
        assert_eq!(get_n_read(&mut slave_ptr).unwrap(), 0);

        // when zero bytes to read
        flush(&mut slave_ptr).unwrap();
        assert_eq!(get_n_read(&mut slave_ptr).unwrap(), 0);
    }

    #[test]
    fn test_open_missing_port() {
        assert!(matches!(
            SerialLineSource::open("/dev/does-not-exist-tfluna", 115_200),
            Err(ScanError::Serial(_))
        ));
    }
}
