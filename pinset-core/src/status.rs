//! Read-only status projection
//!
//! These types are what outer surfaces (web UI, serial console) see of the
//! manager. They are plain copies taken at the moment of the query.

use core::fmt;

use heapless::Vec;
use pinset_hal::{Level, PinId};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Current drive mode of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Mode {
    /// Plain digital output
    #[cfg_attr(feature = "serde", serde(rename = "digital"))]
    Digital,
    /// Fixed PWM duty
    #[cfg_attr(feature = "serde", serde(rename = "PWM"))]
    Pwm,
    /// Holding or ramping towards a fade target
    #[cfg_attr(feature = "serde", serde(rename = "fading"))]
    Fading,
}

impl Mode {
    /// Display name used in status reports
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Digital => "digital",
            Mode::Pwm => "PWM",
            Mode::Fading => "fading",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output value of a pin
///
/// Digital pins report a level, PWM and fading pins report the duty that
/// was last written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinValue {
    Level(Level),
    Duty(u8),
}

impl fmt::Display for PinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinValue::Level(level) => f.write_str(level.as_str()),
            PinValue::Duty(duty) => write!(f, "{}", duty),
        }
    }
}

/// Snapshot of one managed pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSnapshot {
    /// Pin identifier
    pub id: PinId,
    /// Drive mode
    pub mode: Mode,
    /// Last applied output value
    pub value: PinValue,
    /// Whether a timed action or fade is outstanding
    pub pending: bool,
}

/// Result of a single-pin status query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinStatus {
    /// Pin is managed by this instance
    Managed { mode: Mode, value: PinValue },
    /// Pin was never passed to the constructor
    NotManaged,
}

impl PinStatus {
    /// Check if the queried pin is managed
    pub fn is_managed(&self) -> bool {
        matches!(self, PinStatus::Managed { .. })
    }

    /// Mode of a managed pin
    pub fn mode(&self) -> Option<Mode> {
        match self {
            PinStatus::Managed { mode, .. } => Some(*mode),
            PinStatus::NotManaged => None,
        }
    }

    /// Value of a managed pin
    pub fn value(&self) -> Option<PinValue> {
        match self {
            PinStatus::Managed { value, .. } => Some(*value),
            PinStatus::NotManaged => None,
        }
    }
}

/// Values of every managed pin, in construction order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus<const N: usize> {
    entries: Vec<(PinId, PinValue), N>,
}

impl<const N: usize> SystemStatus<N> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, pin: PinId, value: PinValue) {
        // Capacity matches the manager's, so this cannot overflow
        let _ = self.entries.push((pin, value));
    }

    /// Iterate over `(pin, value)` pairs in construction order
    pub fn iter(&self) -> impl Iterator<Item = (PinId, PinValue)> + '_ {
        self.entries.iter().copied()
    }

    /// Look up the value of one pin
    pub fn get(&self, pin: PinId) -> Option<PinValue> {
        self.entries
            .iter()
            .find(|(id, _)| *id == pin)
            .map(|(_, value)| *value)
    }

    /// Number of pins in the report
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the report is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
