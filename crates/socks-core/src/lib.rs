//! Hardware-independent core library for socks-rs
//!
//! This crate contains the platform-agnostic pieces of the pressure sensing
//! prototype: the moving-average sensor reader, its calibration constants,
//! the sampling cadence, and the UI pin configuration.
//!
//! It is `#![no_std]` so it compiles on both embedded targets (ESP32-S3) and
//! desktop hosts (for the simulator and tests). The platform supplies analog
//! reads through [`sensors::AnalogInput`].

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod sampling;
pub mod sensors;
pub mod ui;

pub use config::Calibration;
pub use sensors::{AnalogInput, PressureReading, SensorError, SensorReader};
