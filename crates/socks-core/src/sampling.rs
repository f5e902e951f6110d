//! Sampling cadence for the moving-average readers.
//!
//! Readers do not manage timing. A periodic driver (the firmware's ticker or
//! the simulator's loop) calls `update()` every [`SAMPLE_PERIOD`], so one full
//! smoothing window spans [`WINDOW_DURATION`].

use embassy_time::Duration;

use crate::config::MOVING_SUM_SIZE;

/// Interval between two `update()` calls
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(10);

/// Time covered by one full window at the default cadence
pub const WINDOW_DURATION: Duration = window_duration(SAMPLE_PERIOD, MOVING_SUM_SIZE);

/// Emit one log line per second of sampling
pub const LOG_EVERY_N_SAMPLES: u32 = (1000 / SAMPLE_PERIOD.as_millis()) as u32;

/// Duration covered by `samples` updates spaced `period` apart
pub const fn window_duration(period: Duration, samples: usize) -> Duration {
    Duration::from_ticks(period.as_ticks() * samples as u64)
}
