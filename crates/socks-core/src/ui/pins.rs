//! Pin assignments for the button-and-OLED prototype
//!
//! Pin numbers are the board's digital pin numbers; the analog aliases the
//! buttons were wired to (A3..A6) are noted next to each constant.

use embassy_time::Duration;

use super::ConfigError;

/// Up button (A6)
pub const BUTTON_UP_PIN: u8 = 20;

/// Down button (A5)
pub const BUTTON_DOWN_PIN: u8 = 19;

/// Set button (A4): claim the current pressure as the desired pressure
pub const BUTTON_SET_PIN: u8 = 18;

/// Emergency button (A3): release the valve and reset the desired pressure
pub const BUTTON_EMERGENCY_PIN: u8 = 17;

/// Minimum time between two accepted button transitions
pub const BUTTON_DEBOUNCE: Duration = Duration::from_millis(100);

/// SPI clock, moved off the default pin 13
pub const OLED_SPI_CLOCK_PIN: u8 = 14;

pub const OLED_CHIP_SELECT_PIN: u8 = 10;

pub const OLED_DATA_COMMAND_PIN: u8 = 15;

pub const OLED_RESET_PIN: u8 = 16;

/// u8g2 font used for all OLED text. Opaque to this crate; the display
/// driver resolves it.
pub const OLED_FONT: &str = "u8g2_font_helvR08_tf";

/// Panel is mounted upside down
pub const OLED_ROTATION: DisplayRotation = DisplayRotation::R180;

/// The four front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Up,
    Down,
    Set,
    Emergency,
}

impl ButtonId {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Set, Self::Emergency];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Set => "set",
            Self::Emergency => "emergency",
        }
    }
}

/// Clockwise rotation applied to the display contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRotation {
    R0,
    R90,
    R180,
    R270,
}

impl DisplayRotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPins {
    pub up: u8,
    pub down: u8,
    pub set: u8,
    pub emergency: u8,
}

impl ButtonPins {
    pub const fn pin(&self, button: ButtonId) -> u8 {
        match button {
            ButtonId::Up => self.up,
            ButtonId::Down => self.down,
            ButtonId::Set => self.set,
            ButtonId::Emergency => self.emergency,
        }
    }

    /// Iterate `(button, pin)` pairs in [`ButtonId::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (ButtonId, u8)> + '_ {
        ButtonId::ALL.into_iter().map(|id| (id, self.pin(id)))
    }
}

/// SPI OLED wiring. MOSI uses the board default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPins {
    pub spi_clock: u8,
    pub chip_select: u8,
    pub data_command: u8,
    pub reset: u8,
    pub rotation: DisplayRotation,
    pub font: &'static str,
}

/// Immutable UI hardware description handed to the component that owns the
/// buttons and display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    pub buttons: ButtonPins,
    pub display: DisplayPins,
    pub debounce: Duration,
}

impl UiConfig {
    /// Wiring of the prototype board
    pub const DEFAULT: Self = Self {
        buttons: ButtonPins {
            up: BUTTON_UP_PIN,
            down: BUTTON_DOWN_PIN,
            set: BUTTON_SET_PIN,
            emergency: BUTTON_EMERGENCY_PIN,
        },
        display: DisplayPins {
            spi_clock: OLED_SPI_CLOCK_PIN,
            chip_select: OLED_CHIP_SELECT_PIN,
            data_command: OLED_DATA_COMMAND_PIN,
            reset: OLED_RESET_PIN,
            rotation: OLED_ROTATION,
            font: OLED_FONT,
        },
        debounce: BUTTON_DEBOUNCE,
    };

    /// Every pinned signal with a label for diagnostics
    fn assignments(&self) -> [(&'static str, u8); 8] {
        [
            (ButtonId::Up.label(), self.buttons.up),
            (ButtonId::Down.label(), self.buttons.down),
            (ButtonId::Set.label(), self.buttons.set),
            (ButtonId::Emergency.label(), self.buttons.emergency),
            ("oled spi clock", self.display.spi_clock),
            ("oled chip select", self.display.chip_select),
            ("oled data/command", self.display.data_command),
            ("oled reset", self.display.reset),
        ]
    }

    /// Reject configurations that wire two signals to one pin
    pub fn validate(&self) -> Result<(), ConfigError> {
        let assignments = self.assignments();

        for (i, &(first, pin)) in assignments.iter().enumerate() {
            if let Some(&(second, _)) = assignments[i + 1..].iter().find(|(_, p)| *p == pin) {
                return Err(ConfigError::PinConflict { pin, first, second });
            }
        }

        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
