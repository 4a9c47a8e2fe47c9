//! Protocol errors

use core::fmt;

use pinset_core::PinId;

/// Errors from rendering or parsing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Output buffer cannot hold the rendered message
    BufferTooSmall,
    /// Input is not a valid control request
    Malformed,
    /// The action needs a parameter the request did not carry
    MissingField(&'static str),
    /// The request addresses a pin the manager does not own
    UnknownPin(PinId),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "output buffer too small"),
            Self::Malformed => write!(f, "malformed request"),
            Self::MissingField(name) => write!(f, "missing field '{}'", name),
            Self::UnknownPin(pin) => write!(f, "pin {} not managed by this instance", pin),
        }
    }
}
