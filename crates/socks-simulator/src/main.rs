//! Desktop bench for the socks-rs pressure reader.
//!
//! Drives a [`SensorReader`] from a synthetic transducer at the firmware's
//! sampling cadence and logs the smoothed voltage and pressure once per
//! second, so the filter can be exercised without hardware.
//!
//! The synthetic signal is a slow inflate/deflate cycle with a fast ripple on
//! top, and an occasional out-of-range conversion to show fault reporting.
//! Set `RUST_LOG=debug` for per-window detail.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use socks_core::sampling::{LOG_EVERY_N_SAMPLES, SAMPLE_PERIOD, WINDOW_DURATION};
use socks_core::ui::UiConfig;
use socks_core::{AnalogInput, Calibration, SensorError, SensorReader};

// ---------------------------------------------------------------------------
// Simulation constants
// ---------------------------------------------------------------------------

/// Analog pin the simulated transducer is wired to (A7)
const SENSOR_PIN: u8 = 21;

/// Wall-clock length of one simulator run
const SIMULATION_LENGTH: Duration = Duration::from_secs(12);

/// Period of the inflate/deflate cycle in seconds
const CYCLE_PERIOD_SECS: f64 = 8.0;

/// Pressure at the bottom and top of the cycle in mmHg
const BASELINE_MMHG: f64 = 10.0;
const PEAK_MMHG: f64 = 35.0;

/// Ripple riding on the pressure signal, in mmHg
const RIPPLE_MMHG: f64 = 1.5;
const RIPPLE_HZ: f64 = 37.0;

/// Every n-th conversion returns a code the converter cannot produce
const GLITCH_EVERY_N_SAMPLES: u64 = 450;
const GLITCH_CODE: u16 = u16::MAX;

// ---------------------------------------------------------------------------
// Mock transducer
// ---------------------------------------------------------------------------

/// Synthetic pressure transducer behind a 12-bit ADC
struct MockTransducer {
    calibration: Calibration,
    /// Seconds of simulated time
    elapsed_secs: f64,
    dt_secs: f64,
    conversions: u64,
}

impl MockTransducer {
    fn new(calibration: Calibration, sample_period: Duration) -> Self {
        Self {
            calibration,
            elapsed_secs: 0.0,
            dt_secs: sample_period.as_secs_f64(),
            conversions: 0,
        }
    }

    /// Pressure applied to the transducer at time `t`
    fn pressure_at(t: f64) -> f64 {
        let phase = core::f64::consts::TAU * t / CYCLE_PERIOD_SECS;
        let envelope = BASELINE_MMHG + (PEAK_MMHG - BASELINE_MMHG) * 0.5 * (1.0 - phase.cos());
        let ripple = RIPPLE_MMHG * (core::f64::consts::TAU * RIPPLE_HZ * t).sin();

        envelope + ripple
    }

    /// Raw code the ADC reports for `pressure_mmhg`, inverting the calibration
    fn raw_for_pressure(&self, pressure_mmhg: f64) -> u16 {
        let cal = &self.calibration;
        let volts =
            pressure_mmhg * f64::from(cal.pressure_slope) - f64::from(cal.pressure_offset);
        let code = volts / f64::from(cal.reference_voltage) * f64::from(cal.adc_max_value);

        code.round()
            .clamp(0.0, f64::from(cal.full_scale_code())) as u16
    }
}

impl AnalogInput<u8> for MockTransducer {
    type Error = core::convert::Infallible;

    fn read_analog(&mut self, _channel: &mut u8) -> Result<u16, Self::Error> {
        self.conversions += 1;
        self.elapsed_secs += self.dt_secs;

        if self.conversions % GLITCH_EVERY_N_SAMPLES == 0 {
            return Ok(GLITCH_CODE);
        }

        Ok(self.raw_for_pressure(Self::pressure_at(self.elapsed_secs)))
    }
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

fn main() -> Result<(), SensorError> {
    env_logger::init();
    info!("Starting socks-rs simulator");

    let ui = UiConfig::DEFAULT;
    if let Err(e) = ui.validate() {
        warn!("UI configuration: {}", e);
    }
    info!(
        "UI pins: buttons {:?}, display {:?}, debounce {} ms",
        ui.buttons,
        ui.display,
        ui.debounce.as_millis()
    );

    let sample_period = Duration::from_micros(SAMPLE_PERIOD.as_micros());
    info!(
        "Sampling every {} ms, window {} ms",
        SAMPLE_PERIOD.as_millis(),
        WINDOW_DURATION.as_millis()
    );

    let mut reader = SensorReader::<u8>::new(SENSOR_PIN);
    let mut transducer = MockTransducer::new(*reader.calibration(), sample_period);

    let started = Instant::now();
    let mut samples: u32 = 0;

    while started.elapsed() < SIMULATION_LENGTH {
        let tick_start = Instant::now();

        match reader.update(&mut transducer) {
            Ok(()) => {}
            // Faults are reported and the window keeps its previous contents
            Err(e @ SensorError::OutOfRange { .. }) => warn!("Dropped sample: {}", e),
            Err(e) => return Err(e),
        }

        samples += 1;
        if samples % LOG_EVERY_N_SAMPLES == 0 {
            let reading = reader.reading();
            info!(
                "t={:>5.2}s  V={:.3}  P={:>6.2} mmHg{}",
                transducer.elapsed_secs,
                reading.voltage,
                reading.pressure_mmhg,
                if reading.saturated { "  (saturated)" } else { "" }
            );
            debug!(
                "sum={} samples={} applied={:.2} mmHg",
                reader.running_sum(),
                reader.sample_count(),
                MockTransducer::pressure_at(transducer.elapsed_secs)
            );
        }

        let elapsed = tick_start.elapsed();
        if elapsed < sample_period {
            std::thread::sleep(sample_period - elapsed);
        }
    }

    info!("Simulator exiting after {} samples", samples);
    Ok(())
}
