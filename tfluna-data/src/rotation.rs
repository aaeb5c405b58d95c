#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angular bookkeeping of the spinning head.
///
/// `angle` is re-zeroed by every index pulse and advanced by `angle_step`
/// after every distance sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationState {
    /// Rotation speed in revolutions per minute.
    pub rpm: f64,
    /// Degrees advanced per distance sample.
    pub angle_step: f64,
    /// Current heading in degrees, in `[0, 360)`.
    pub angle: f64,
}
