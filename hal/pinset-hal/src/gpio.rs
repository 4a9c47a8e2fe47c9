//! Output pin abstractions
//!
//! The pin manager only ever needs three primitives: put a pin into output
//! mode, drive it to a logic level, or drive it with an 8-bit PWM duty.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical pin identifier (GPIO number)
pub type PinId = u8;

/// Digital logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Logic 0
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "LOW"))]
    Low,
    /// Logic 1
    #[cfg_attr(feature = "serde", serde(rename = "HIGH"))]
    High,
}

impl Level {
    /// Check if this is the high level
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if this is the low level
    pub fn is_low(self) -> bool {
        self == Level::Low
    }

    /// Display name used in status reports
    pub fn as_str(self) -> &'static str {
        match self {
            Level::High => "HIGH",
            Level::Low => "LOW",
        }
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Self::Output {
        match self {
            Level::High => Level::Low,
            Level::Low => Level::High,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl core::fmt::Display for Level {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output pin driver for a set of pins addressed by number
///
/// Implementations own the actual peripherals. Writes are assumed to
/// succeed; an implementation that can fail should handle or record the
/// failure itself rather than surface it to the pin manager.
pub trait PinDriver {
    /// Configure a pin as a plain output
    ///
    /// Called once per pin at start-up, and again whenever a pin leaves
    /// PWM/fading mode for digital mode.
    fn configure_output(&mut self, pin: PinId);

    /// Drive a pin to a digital level
    fn write_digital(&mut self, pin: PinId, level: Level);

    /// Drive a pin with a PWM duty cycle (0 = off, 255 = fully on)
    fn write_analog(&mut self, pin: PinId, duty: u8);
}

impl<T: PinDriver + ?Sized> PinDriver for &mut T {
    fn configure_output(&mut self, pin: PinId) {
        (**self).configure_output(pin)
    }

    fn write_digital(&mut self, pin: PinId, level: Level) {
        (**self).write_digital(pin, level)
    }

    fn write_analog(&mut self, pin: PinId, duty: u8) {
        (**self).write_analog(pin, duty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_not() {
        assert_eq!(!Level::High, Level::Low);
        assert_eq!(!Level::Low, Level::High);
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(bool::from(Level::High));
    }

    #[test]
    fn test_level_names() {
        assert_eq!(Level::High.as_str(), "HIGH");
        assert_eq!(Level::Low.as_str(), "LOW");
        assert_eq!(Level::default(), Level::Low);
    }
}
