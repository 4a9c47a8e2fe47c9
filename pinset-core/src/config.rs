//! Pin manager configuration
//!
//! Timing defaults and value limits shared by all managed pins.

/// Length of the fade ramp, after any hold (milliseconds)
pub const DEFAULT_FADE_SPAN_MS: u32 = 1000;

/// Largest PWM duty value (fully on)
pub const MAX_DUTY: u8 = 255;

/// Milliseconds per second for converting command delays
pub const MS_PER_SECOND: u32 = 1000;

/// Pin manager configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSetConfig {
    /// Duration of the interpolation phase of every fade (ms)
    pub fade_span_ms: u32,
}

impl Default for PinSetConfig {
    fn default() -> Self {
        Self {
            fade_span_ms: DEFAULT_FADE_SPAN_MS,
        }
    }
}

/// Clamp a requested duty value into `0..=MAX_DUTY`
pub fn clamp_duty(value: i32) -> u8 {
    value.clamp(0, MAX_DUTY as i32) as u8
}

/// Convert a command delay in whole seconds to milliseconds
///
/// Saturates instead of wrapping for absurdly long delays.
pub fn seconds_to_ms(seconds: u32) -> u32 {
    seconds.saturating_mul(MS_PER_SECOND)
}
