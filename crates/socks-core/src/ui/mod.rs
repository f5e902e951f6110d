//! User-interface hardware configuration
//!
//! The prototype UI is four push buttons and an SPI OLED module. This module
//! only describes how that hardware is wired; driving the display and
//! debouncing the buttons belong to whichever component owns the UI
//! peripherals.

mod pins;

use thiserror_no_std::Error;

pub use pins::*;

/// Errors found while validating a [`UiConfig`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Two UI signals are assigned to the same pin
    #[error("pin {pin} is assigned to both {first} and {second}")]
    PinConflict {
        pin: u8,
        first: &'static str,
        second: &'static str,
    },
}
