//! ESP32-S3 firmware-specific modules for socks-rs
//!
//! This crate contains hardware-specific code that cannot compile on desktop
//! targets: the esp-hal ADC binding behind `socks_core::AnalogInput`.

#![no_std]

pub mod adc;
