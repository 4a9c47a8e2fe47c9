//! Construction errors
//!
//! Runtime commands never fail: unknown pins are ignored and out-of-range
//! values are clamped. Only building a manager can be rejected.

use pinset_hal::PinId;

/// Errors that can occur when creating a pin manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinSetError {
    /// More pins requested than the manager has capacity for
    TooManyPins,
    /// The same pin was listed more than once
    DuplicatePin(PinId),
}

impl core::fmt::Display for PinSetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PinSetError::TooManyPins => f.write_str("too many pins for manager capacity"),
            PinSetError::DuplicatePin(pin) => write!(f, "pin {} listed more than once", pin),
        }
    }
}
