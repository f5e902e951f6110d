//! Build-time calibration constants for analog pressure transducers
//!
//! There is no runtime configuration surface: a sensor model's constants are
//! fixed at compile time and handed to a [`SensorReader`](crate::sensors::SensorReader)
//! when it is constructed.

/// Number of raw samples averaged by a sensor reader
pub const MOVING_SUM_SIZE: usize = 10;

/// ADC reference voltage in volts
pub const REFERENCE_VOLTAGE: f32 = 3.3;

/// Divisor mapping a raw reading onto the reference voltage (12-bit converter)
pub const ADC_MAX_VALUE: u16 = 4096;

/// Volts added to the smoothed voltage before scaling to pressure
pub const A301_PRESSURE_OFFSET_V: f32 = 0.0484174;

/// Volts per mmHg
pub const A301_PRESSURE_SLOPE_V_PER_MMHG: f32 = 0.0288813;

/// Calibration constants for one sensor model.
///
/// Voltage is `reference_voltage * sum / (adc_max_value * N)` and pressure is
/// `(voltage + pressure_offset) / pressure_slope`. The pressure constants are
/// empirical and have no physical derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Sensor model, used to label errors and log lines
    pub name: &'static str,
    /// Volts at the ADC's full-scale code
    pub reference_voltage: f32,
    /// Largest raw reading accepted from the converter
    pub adc_max_value: u16,
    /// Volts
    pub pressure_offset: f32,
    /// Volts per mmHg
    pub pressure_slope: f32,
}

impl Calibration {
    /// Constants measured for the A301 transducer on a 3.3 V, 12-bit ADC
    pub const A301: Self = Self {
        name: "A301",
        reference_voltage: REFERENCE_VOLTAGE,
        adc_max_value: ADC_MAX_VALUE,
        pressure_offset: A301_PRESSURE_OFFSET_V,
        pressure_slope: A301_PRESSURE_SLOPE_V_PER_MMHG,
    };

    /// Map a smoothed voltage onto pressure in mmHg
    #[inline]
    pub fn pressure_from_voltage(&self, voltage: f32) -> f32 {
        (voltage + self.pressure_offset) / self.pressure_slope
    }

    /// Highest raw code the converter produces; samples at or above it are clipped
    #[inline]
    pub const fn full_scale_code(&self) -> u16 {
        self.adc_max_value.saturating_sub(1)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::A301
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a301_is_default() {
        assert_eq!(Calibration::default(), Calibration::A301);
    }

    #[test]
    fn test_full_scale_code_for_12_bit_adc() {
        assert_eq!(Calibration::A301.full_scale_code(), 4095);
    }

    #[test]
    fn test_pressure_from_voltage_is_affine() {
        let cal = Calibration {
            name: "test",
            reference_voltage: 3.3,
            adc_max_value: 4096,
            pressure_offset: 0.5,
            pressure_slope: 0.25,
        };

        assert_eq!(cal.pressure_from_voltage(0.0), 2.0);
        assert_eq!(cal.pressure_from_voltage(1.5), 8.0);
    }
}
