pub(crate) const SPEED_PREFIX: &str = "R:";
pub(crate) const DISTANCE_PREFIX: &str = "D:";
// (360 degrees / revolution) / (60 seconds / minute)
pub(crate) const DEGREES_PER_SECOND_PER_RPM: f64 = 6.;
pub(crate) const FULL_TURN_DEGREES: f64 = 360.;
pub(crate) const SERIAL_TIMEOUT_MS: u64 = 10;
// Substring of USB-serial adapter names preferred by port discovery
pub(crate) const USB_SERIAL_MARKER: &str = "usbserial";
pub(crate) const UDP_TIMEOUT_MS: u64 = 10;
pub(crate) const DEFAULT_UDP_PORT: u16 = 12345;
pub(crate) const MAX_DATAGRAM_SIZE: usize = 1024;
// A stream with no line terminator must not grow the pending buffer forever
pub(crate) const MAX_PENDING_LINE_BYTES: usize = 4096;
pub(crate) const DEFAULT_RENDER_INTERVAL_MS: u64 = 100;
pub(crate) const SNAPSHOT_CHANNEL_DEPTH: usize = 10;
