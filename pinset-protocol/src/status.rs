//! Status rendering
//!
//! Pin values are rendered as strings: `"HIGH"`/`"LOW"` for digital pins,
//! the decimal duty for PWM and fading pins.

use core::fmt::Write;

use heapless::{String, Vec};
use pinset_core::{Mode, PinId, PinStatus, PinValue, SystemStatus};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ProtocolError;

/// Error text reported for a pin the manager does not own
pub const NOT_MANAGED_MESSAGE: &str = "Pin not managed by this instance";

/// Longest rendered pin id ("255")
type Key = String<3>;
/// Longest rendered value ("HIGH")
type Value = String<4>;

fn format_key(pin: PinId) -> Result<Key, ProtocolError> {
    let mut key = Key::new();
    write!(key, "{}", pin).map_err(|_| ProtocolError::BufferTooSmall)?;
    Ok(key)
}

fn format_value(value: PinValue) -> Result<Value, ProtocolError> {
    let mut out = Value::new();
    write!(out, "{}", value).map_err(|_| ProtocolError::BufferTooSmall)?;
    Ok(out)
}

/// Pre-rendered `pin: value` pairs serialized as one JSON object
struct SystemReport<'a>(&'a [(Key, Value)]);

impl Serialize for SystemReport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key.as_str(), value.as_str())?;
        }
        map.end()
    }
}

#[derive(serde::Serialize)]
struct PinReport<'a> {
    mode: Mode,
    value: &'a str,
}

#[derive(serde::Serialize)]
struct ErrorReport<'a> {
    error: &'a str,
}

fn encode<'b, T: Serialize>(message: &T, buf: &'b mut [u8]) -> Result<&'b str, ProtocolError> {
    let len = serde_json_core::to_slice(message, buf).map_err(|_| ProtocolError::BufferTooSmall)?;
    core::str::from_utf8(&buf[..len]).map_err(|_| ProtocolError::Malformed)
}

/// Render every managed pin as `{"<id>":"<value>",...}`
///
/// Keys appear in construction order.
pub fn render_system<'b, const N: usize>(
    status: &SystemStatus<N>,
    buf: &'b mut [u8],
) -> Result<&'b str, ProtocolError> {
    let mut entries: Vec<(Key, Value), N> = Vec::new();
    for (pin, value) in status.iter() {
        entries
            .push((format_key(pin)?, format_value(value)?))
            .map_err(|_| ProtocolError::BufferTooSmall)?;
    }
    encode(&SystemReport(&entries), buf)
}

/// Render one pin as `{"mode":...,"value":...}`, or an error object if
/// the pin is not managed
pub fn render_pin<'b>(status: &PinStatus, buf: &'b mut [u8]) -> Result<&'b str, ProtocolError> {
    match *status {
        PinStatus::Managed { mode, value } => {
            let value = format_value(value)?;
            encode(
                &PinReport {
                    mode,
                    value: value.as_str(),
                },
                buf,
            )
        }
        PinStatus::NotManaged => encode(
            &ErrorReport {
                error: NOT_MANAGED_MESSAGE,
            },
            buf,
        ),
    }
}
