#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One classified line of the sensor's text protocol.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineEvent {
    /// `R:<float>`, emitted once per revolution by the index pulse.
    SpeedUpdate { rpm: f64 },
    /// `D:<integer>`, one range reading.
    DistanceSample { distance: i64 },
    /// Anything else, including a known prefix with a bad payload.
    Unrecognized,
}
