//! One-shot ADC sampling for the pressure transducer

use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcPin};
use esp_hal::peripherals::{ADC1, GPIO1};
use socks_core::AnalogInput;

/// Transducer input: GPIO1 on ADC1 channel 0
pub type SensorPin<'d> = AdcPin<GPIO1<'d>, ADC1<'d>>;

/// Blocking ADC1 driver exposed to the core as an [`AnalogInput`]
pub struct EspAdc<'d> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
}

impl<'d> EspAdc<'d> {
    pub fn new(adc: Adc<'d, ADC1<'d>, Blocking>) -> Self {
        Self { adc }
    }
}

impl<'d> AnalogInput<SensorPin<'d>> for EspAdc<'d> {
    type Error = ();

    /// Busy-waits for the conversion; a 12-bit one-shot takes a few microseconds.
    fn read_analog(&mut self, channel: &mut SensorPin<'d>) -> Result<u16, Self::Error> {
        nb::block!(self.adc.read_oneshot(channel))
    }
}
