use log::{error, trace, warn};

use super::{AnalogInput, MovingSum, SensorError};
use crate::config::{Calibration, MOVING_SUM_SIZE};

/// Snapshot of a reader's smoothed output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureReading {
    /// Moving-average voltage in volts
    pub voltage: f32,
    /// Estimated pressure in mmHg
    pub pressure_mmhg: f32,
    /// A sample in the window sits at the converter's full scale, so the
    /// estimate is clipped
    pub saturated: bool,
    /// The window has received at least `N` samples
    pub primed: bool,
}

/// Moving-average reader for one analog pressure transducer.
///
/// Bound to a single input channel `C` at construction. Each [`update`](Self::update)
/// reads one raw sample through an [`AnalogInput`] and replaces the oldest
/// sample in an `N`-slot window; voltage and pressure are derived from the
/// window's running sum.
///
/// Timing is the caller's job: call `update` every sampling period, and the
/// window then covers `N` periods.
pub struct SensorReader<C, const N: usize = MOVING_SUM_SIZE> {
    channel: C,
    calibration: Calibration,
    window: MovingSum<N>,
}

impl<C, const N: usize> SensorReader<C, N> {
    /// Bind a reader to `channel` using the A301 calibration.
    /// No I/O is performed.
    pub const fn new(channel: C) -> Self {
        Self::with_calibration(channel, Calibration::A301)
    }

    pub const fn with_calibration(channel: C, calibration: Calibration) -> Self {
        Self {
            channel,
            calibration,
            window: MovingSum::new(),
        }
    }

    /// Sample the bound channel once and fold the reading into the window.
    ///
    /// On error the window is left untouched.
    pub fn update<A>(&mut self, adc: &mut A) -> Result<(), SensorError>
    where
        A: AnalogInput<C>,
    {
        let sensor = self.calibration.name;
        let raw = adc.read_analog(&mut self.channel).map_err(|e| {
            error!("{} analog read failed: {:?}", sensor, e);
            SensorError::ReadFailed {
                sensor,
                details: "ADC conversion error",
            }
        })?;

        self.push_sample(raw).map(|_| ())
    }

    /// Fold an already-read raw sample into the window.
    ///
    /// Returns the evicted sample. Codes above the calibrated maximum are
    /// rejected as a hardware fault and not averaged in.
    pub fn push_sample(&mut self, raw: u16) -> Result<u16, SensorError> {
        let max = self.calibration.adc_max_value;
        if raw > max {
            warn!(
                "{}: rejecting raw sample {} above ADC max {}",
                self.calibration.name, raw, max
            );
            return Err(SensorError::OutOfRange {
                sensor: self.calibration.name,
                raw,
                max,
            });
        }

        let evicted = self.window.push(raw);
        trace!(
            "{}: raw={} evicted={} sum={}",
            self.calibration.name,
            raw,
            evicted,
            self.window.sum()
        );

        Ok(evicted)
    }

    /// Moving-average voltage in volts. Zero before the first update.
    pub fn read_voltage(&self) -> f32 {
        let cal = &self.calibration;
        (cal.reference_voltage * self.window.sum() as f32)
            / (f32::from(cal.adc_max_value) * N as f32)
    }

    /// Pressure estimate in mmHg
    pub fn read_pressure(&self) -> f32 {
        self.calibration.pressure_from_voltage(self.read_voltage())
    }

    pub fn reading(&self) -> PressureReading {
        let voltage = self.read_voltage();

        PressureReading {
            voltage,
            pressure_mmhg: self.calibration.pressure_from_voltage(voltage),
            saturated: self.is_saturated(),
            primed: self.is_primed(),
        }
    }

    /// Whether any sample in the window sits at the converter's full scale
    pub fn is_saturated(&self) -> bool {
        let full_scale = self.calibration.full_scale_code();
        self.window.samples()[..self.window.len()]
            .iter()
            .any(|&sample| sample >= full_scale)
    }

    /// Whether `N` samples have been accepted since construction or reset
    pub const fn is_primed(&self) -> bool {
        self.window.is_full()
    }

    /// Accepted samples, saturating at `N`
    pub const fn sample_count(&self) -> usize {
        self.window.len()
    }

    pub const fn running_sum(&self) -> u32 {
        self.window.sum()
    }

    pub const fn channel(&self) -> &C {
        &self.channel
    }

    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Forget all samples; the channel binding is kept
    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub fn into_channel(self) -> C {
        self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays scripted samples and records which channel was read
    struct FakeAdc<'a> {
        samples: &'a [u16],
        position: usize,
        last_channel: Option<u8>,
    }

    impl<'a> FakeAdc<'a> {
        fn new(samples: &'a [u16]) -> Self {
            Self {
                samples,
                position: 0,
                last_channel: None,
            }
        }
    }

    impl AnalogInput<u8> for FakeAdc<'_> {
        type Error = &'static str;

        fn read_analog(&mut self, channel: &mut u8) -> Result<u16, Self::Error> {
            self.last_channel = Some(*channel);
            let sample = self.samples.get(self.position).copied().ok_or("exhausted")?;
            self.position += 1;
            Ok(sample)
        }
    }

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    fn feed<const N: usize>(reader: &mut SensorReader<u8, N>, samples: &[u16]) {
        let mut adc = FakeAdc::new(samples);
        for _ in samples {
            reader.update(&mut adc).unwrap();
        }
    }

    #[test]
    fn test_voltage_is_zero_before_first_update() {
        let reader = SensorReader::<u8>::new(3);

        assert_eq!(reader.read_voltage(), 0.0);
        assert_eq!(reader.running_sum(), 0);
        assert!(!reader.is_primed());
    }

    #[test]
    fn test_single_full_scale_sample_in_ten() {
        let mut reader = SensorReader::<u8>::new(3);
        feed(&mut reader, &[0, 0, 0, 0, 0, 0, 0, 0, 0, 4096]);

        assert_eq!(reader.running_sum(), 4096);
        assert_close(reader.read_voltage(), 0.33, 1e-5);
        assert_close(reader.read_pressure(), 13.10, 0.01);
    }

    #[test]
    fn test_half_scale_samples_give_half_reference() {
        let mut reader = SensorReader::<u8>::new(3);
        feed(&mut reader, &[2048; 10]);

        assert_close(reader.read_voltage(), 1.65, 1e-5);
    }

    #[test]
    fn test_voltage_matches_window_average() {
        let samples = [12, 400, 1024, 3000, 77, 2048, 4095, 9, 1500, 2600];
        let mut reader = SensorReader::<u8>::new(0);
        feed(&mut reader, &samples);

        let sum: u32 = samples.iter().map(|&s| u32::from(s)).sum();
        let expected = 3.3 * sum as f32 / (4096.0 * 10.0);
        assert_close(reader.read_voltage(), expected, 1e-5);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut reader = SensorReader::<u8>::new(0);
        feed(&mut reader, &[100, 2000, 3999]);

        let voltage = reader.read_voltage();
        let pressure = reader.read_pressure();
        for _ in 0..5 {
            assert_eq!(reader.read_voltage(), voltage);
            assert_eq!(reader.read_pressure(), pressure);
        }
    }

    #[test]
    fn test_eleventh_update_evicts_first_sample() {
        let samples = [500, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut reader = SensorReader::<u8>::new(0);
        feed(&mut reader, &samples);

        let before = reader.running_sum();
        let evicted = reader.push_sample(1200).unwrap();

        assert_eq!(evicted, 500);
        assert_eq!(i64::from(reader.running_sum()) - i64::from(before), 1200 - 500);
    }

    #[test]
    fn test_update_reads_bound_channel() {
        let mut reader = SensorReader::<u8>::new(17);
        let mut adc = FakeAdc::new(&[42]);

        reader.update(&mut adc).unwrap();

        assert_eq!(adc.last_channel, Some(17));
        assert_eq!(*reader.channel(), 17);
        assert_eq!(reader.running_sum(), 42);
    }

    #[test]
    fn test_channel_is_fixed_after_construction() {
        let mut reader = SensorReader::<u8>::new(17);
        let mut adc = FakeAdc::new(&[1, 2, 3]);

        reader.update(&mut adc).unwrap();
        assert_eq!(*reader.channel(), 17);

        reader.reset();
        reader.update(&mut adc).unwrap();
        assert_eq!(*reader.channel(), 17);
        assert_eq!(adc.last_channel, Some(17));
    }

    #[test]
    fn test_out_of_range_sample_is_rejected() {
        let mut reader = SensorReader::<u8>::new(0);
        feed(&mut reader, &[10, 20]);

        let err = reader.push_sample(4097).unwrap_err();

        assert_eq!(
            err,
            SensorError::OutOfRange {
                sensor: "A301",
                raw: 4097,
                max: 4096
            }
        );
        assert_eq!(reader.running_sum(), 30);
        assert_eq!(reader.sample_count(), 2);
    }

    #[test]
    fn test_failed_read_leaves_window_untouched() {
        let mut reader = SensorReader::<u8>::new(0);
        feed(&mut reader, &[300]);

        let mut adc = FakeAdc::new(&[]);
        let err = reader.update(&mut adc).unwrap_err();

        assert!(matches!(err, SensorError::ReadFailed { sensor: "A301", .. }));
        assert_eq!(reader.running_sum(), 300);
        assert_eq!(reader.sample_count(), 1);
    }

    #[test]
    fn test_primed_after_window_fills() {
        let mut reader = SensorReader::<u8, 4>::new(0);
        feed(&mut reader, &[1, 2, 3]);
        assert!(!reader.is_primed());

        reader.push_sample(4).unwrap();
        assert!(reader.is_primed());
        assert_eq!(reader.sample_count(), 4);
    }

    #[test]
    fn test_saturation_tracks_window_contents() {
        let mut reader = SensorReader::<u8, 3>::new(0);
        feed(&mut reader, &[4095, 10, 10]);
        assert!(reader.is_saturated());

        // Push the full-scale sample out of the window
        reader.push_sample(10).unwrap();
        assert!(!reader.is_saturated());
    }

    #[test]
    fn test_reading_snapshot() {
        let mut reader = SensorReader::<u8>::new(0);
        feed(&mut reader, &[2048; 10]);

        let reading = reader.reading();

        assert_eq!(reading.voltage, reader.read_voltage());
        assert_eq!(reading.pressure_mmhg, reader.read_pressure());
        assert!(reading.primed);
        assert!(!reading.saturated);
    }

    #[test]
    fn test_custom_calibration() {
        let calibration = Calibration {
            name: "bench",
            reference_voltage: 5.0,
            adc_max_value: 1024,
            pressure_offset: 0.0,
            pressure_slope: 0.5,
        };
        let mut reader = SensorReader::<u8, 2>::with_calibration(0, calibration);
        feed(&mut reader, &[1024, 1024]);

        assert_close(reader.read_voltage(), 5.0, 1e-6);
        assert_close(reader.read_pressure(), 10.0, 1e-5);
        assert_eq!(reader.calibration().name, "bench");
    }

    #[test]
    fn test_reset_keeps_channel() {
        let mut reader = SensorReader::<u8>::new(9);
        feed(&mut reader, &[4000, 4000]);

        reader.reset();

        assert_eq!(reader.read_voltage(), 0.0);
        assert_eq!(reader.sample_count(), 0);
        assert_eq!(reader.into_channel(), 9);
    }
}
