mod moving_sum;
mod reader;

use thiserror_no_std::Error;

pub use moving_sum::MovingSum;
pub use reader::{PressureReading, SensorReader};

/// Errors raised while sampling an analog sensor
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The platform's analog read primitive failed
    #[error("{sensor}: analog read failed ({details})")]
    ReadFailed {
        sensor: &'static str,
        details: &'static str,
    },

    /// The converter returned a code above the calibrated maximum.
    /// Treated as a hardware fault; the sample is not averaged in.
    #[error("{sensor}: raw sample {raw} outside [0, {max}]")]
    OutOfRange {
        sensor: &'static str,
        raw: u16,
        max: u16,
    },
}

/// Platform analog-to-digital read primitive.
///
/// `C` identifies the input channel. It is taken by `&mut` because some HALs
/// (esp-hal's `AdcPin`) need exclusive access to the pin handle to sample it.
pub trait AnalogInput<C> {
    type Error: core::fmt::Debug;

    /// Read one raw sample from `channel`
    fn read_analog(&mut self, channel: &mut C) -> Result<u16, Self::Error>;
}
