//! Duty-cycle channel bank
//!
//! Maps pin ids onto `embedded_hal` PWM channels so that one set of
//! hardware outputs can serve both digital and analog writes:
//!
//! - `High` drives the channel fully on, `Low` fully off
//! - An analog duty `v` drives the channel at `v / 255` of its maximum
//!
//! Channel errors are not reported to the caller. The manager treats
//! writes as infallible, so failures are counted and can be read back
//! with [`DutyCycleBank::fault_count`].

use embedded_hal::pwm::SetDutyCycle;
use heapless::Vec;
use pinset_hal::{Level, PinDriver, PinId};

/// Full-scale analog duty
const DUTY_SCALE: u16 = 255;

/// Error registering a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BankError {
    /// The bank has no free slots
    Full,
    /// A channel is already registered for this pin id
    DuplicatePin(PinId),
}

impl core::fmt::Display for BankError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "channel bank is full"),
            Self::DuplicatePin(pin) => write!(f, "pin {} already has a channel", pin),
        }
    }
}

/// Output polarity of a channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Logical high = output high
    #[default]
    ActiveHigh,
    /// Logical high = output low (sinking LEDs, low-side drivers)
    ActiveLow,
}

struct Channel<P> {
    pin: PinId,
    output: P,
    polarity: Polarity,
}

/// A fixed-size set of PWM channels addressed by pin id
pub struct DutyCycleBank<P, const N: usize> {
    channels: Vec<Channel<P>, N>,
    faults: u32,
}

impl<P: SetDutyCycle, const N: usize> DutyCycleBank<P, N> {
    /// Create an empty bank
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
            faults: 0,
        }
    }

    /// Register an active-high channel for `pin`
    pub fn add(&mut self, pin: PinId, output: P) -> Result<(), BankError> {
        self.add_with_polarity(pin, output, Polarity::ActiveHigh)
    }

    /// Register a channel for `pin` with the given polarity
    pub fn add_with_polarity(
        &mut self,
        pin: PinId,
        output: P,
        polarity: Polarity,
    ) -> Result<(), BankError> {
        if self.contains(pin) {
            return Err(BankError::DuplicatePin(pin));
        }
        self.channels
            .push(Channel {
                pin,
                output,
                polarity,
            })
            .map_err(|_| BankError::Full)
    }

    /// Whether a channel is registered for `pin`
    pub fn contains(&self, pin: PinId) -> bool {
        self.channels.iter().any(|c| c.pin == pin)
    }

    /// The channel registered for `pin`
    pub fn channel(&self, pin: PinId) -> Option<&P> {
        self.channels
            .iter()
            .find(|c| c.pin == pin)
            .map(|c| &c.output)
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check if no channels are registered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Writes that failed, or that addressed a pin with no channel
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    fn apply(&mut self, pin: PinId, duty: u8) {
        let Some(channel) = self.channels.iter_mut().find(|c| c.pin == pin) else {
            self.faults = self.faults.saturating_add(1);
            return;
        };

        let duty = match channel.polarity {
            Polarity::ActiveHigh => duty,
            Polarity::ActiveLow => DUTY_SCALE as u8 - duty,
        };
        let result = match duty {
            0 => channel.output.set_duty_cycle_fully_off(),
            255 => channel.output.set_duty_cycle_fully_on(),
            v => channel.output.set_duty_cycle_fraction(v as u16, DUTY_SCALE),
        };
        if result.is_err() {
            self.faults = self.faults.saturating_add(1);
        }
    }
}

impl<P: SetDutyCycle, const N: usize> Default for DutyCycleBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SetDutyCycle, const N: usize> PinDriver for DutyCycleBank<P, N> {
    /// Channels are always outputs; this only checks that one exists
    fn configure_output(&mut self, pin: PinId) {
        if !self.contains(pin) {
            self.faults = self.faults.saturating_add(1);
        }
    }

    fn write_digital(&mut self, pin: PinId, level: Level) {
        let duty = match level {
            Level::High => 255,
            Level::Low => 0,
        };
        self.apply(pin, duty);
    }

    fn write_analog(&mut self, pin: PinId, duty: u8) {
        self.apply(pin, duty);
    }
}
