//! Pin manager
//!
//! Owns a fixed set of output pins and advances their timed actions from a
//! single cooperative poll loop.
//!
//! # Usage
//!
//! Commands take effect on the output immediately. Anything with a delay
//! or a fade needs [`PinManager::tick`] to be called frequently (every few
//! milliseconds to tens of milliseconds) from the host's main loop.
//!
//! ```ignore
//! let mut pins = PinManager::<_, _, 4>::with_defaults(driver, clock, &[2, 6])?;
//! pins.set_digital_timed(2, Level::High, 5, None); // on now, off in 5s
//! pins.fade(6, 0, 255);                             // ramp over 1s
//!
//! loop {
//!     pins.tick();
//! }
//! ```
//!
//! Every command names a pin. Pins that were not passed to the constructor
//! are ignored, so a stray command can never halt the control loop.

use heapless::Vec;
use pinset_hal::{Clock, Level, PinDriver, PinId};

use crate::config::{clamp_duty, seconds_to_ms, PinSetConfig, MAX_DUTY};
use crate::error::PinSetError;
use crate::pin::fade::Fade;
use crate::pin::record::{Pending, PinRecord};
use crate::pin::FadePhase;
use crate::status::{PinSnapshot, PinStatus, SystemStatus};

/// Manager for up to `N` output pins
///
/// - `D`: output driver the pins are written through
/// - `K`: millisecond clock read at every command and tick
/// - `C`: completion callback type, invoked with the pin id once an
///   action finishes. Defaults to a plain function pointer so no allocator
///   is needed; hosts with `alloc` can use `Box<dyn FnOnce(PinId)>`.
pub struct PinManager<D, K, const N: usize, C = fn(PinId)> {
    driver: D,
    clock: K,
    config: PinSetConfig,
    pins: Vec<PinRecord<C>, N>,
}

impl<D, K, const N: usize, C> PinManager<D, K, N, C>
where
    D: PinDriver,
    K: Clock,
    C: FnOnce(PinId),
{
    /// Create a manager for `ids`
    ///
    /// Every pin is configured as an output and driven low. The id list is
    /// validated before any pin is touched.
    pub fn new(
        mut driver: D,
        clock: K,
        ids: &[PinId],
        config: PinSetConfig,
    ) -> Result<Self, PinSetError> {
        if ids.len() > N {
            return Err(PinSetError::TooManyPins);
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(PinSetError::DuplicatePin(*id));
            }
        }

        let mut pins = Vec::new();
        for &id in ids {
            // Length was checked above
            let _ = pins.push(PinRecord::new(id, &mut driver));
        }

        Ok(Self {
            driver,
            clock,
            config,
            pins,
        })
    }

    /// Create a manager with the default configuration
    pub fn with_defaults(driver: D, clock: K, ids: &[PinId]) -> Result<Self, PinSetError> {
        Self::new(driver, clock, ids, PinSetConfig::default())
    }

    /// The record for `pin` together with the driver it is written through
    fn record_mut(&mut self, pin: PinId) -> Option<(&mut PinRecord<C>, &mut D)> {
        let Self { pins, driver, .. } = self;
        pins.iter_mut()
            .find(|r| r.id() == pin)
            .map(|record| (record, driver))
    }

    fn find(&self, pin: PinId) -> Option<&PinRecord<C>> {
        self.pins.iter().find(|r| r.id() == pin)
    }

    // --- Digital ---

    /// Drive a pin to `level`, cancelling any pending action
    pub fn set_digital(&mut self, pin: PinId, level: Level) {
        let Some((record, driver)) = self.record_mut(pin) else {
            return;
        };
        record.drive_digital(level, None, driver);
    }

    /// Drive a pin to `level` now and back to the opposite level after
    /// `delay_s` seconds
    ///
    /// `on_complete` fires once the pin has reverted.
    pub fn set_digital_timed(
        &mut self,
        pin: PinId,
        level: Level,
        delay_s: u32,
        on_complete: Option<C>,
    ) {
        let now = self.clock.now_ms();
        let Some((record, driver)) = self.record_mut(pin) else {
            return;
        };
        let revert = Pending::new(now, seconds_to_ms(delay_s), !level, on_complete);
        record.drive_digital(level, Some(revert), driver);
    }

    // --- PWM ---

    /// Drive a pin with a PWM duty (clamped to 0-255), cancelling any
    /// pending action
    pub fn set_pwm(&mut self, pin: PinId, duty: i32) {
        let duty = clamp_duty(duty);
        let Some((record, driver)) = self.record_mut(pin) else {
            return;
        };
        record.drive_pwm(duty, None, driver);
    }

    /// Drive a pin with a PWM duty now and switch it to the opposite rail
    /// after `delay_s` seconds
    ///
    /// The revert target is 0 if the clamped duty is nonzero, else 255.
    /// It is not the duty the pin had before the call.
    pub fn set_pwm_timed(&mut self, pin: PinId, duty: i32, delay_s: u32, on_complete: Option<C>) {
        let duty = clamp_duty(duty);
        let target = if duty == 0 { MAX_DUTY } else { 0 };
        let now = self.clock.now_ms();
        let Some((record, driver)) = self.record_mut(pin) else {
            return;
        };
        let revert = Pending::new(now, seconds_to_ms(delay_s), target, on_complete);
        record.drive_pwm(duty, Some(revert), driver);
    }

    // --- Fading ---

    /// Fade a pin from `from` to `to` over the configured fade span
    ///
    /// Both endpoints are clamped to 0-255. This variant has no completion
    /// callback.
    pub fn fade(&mut self, pin: PinId, from: i32, to: i32) {
        let now = self.clock.now_ms();
        let fade = Fade {
            from: clamp_duty(from),
            to: clamp_duty(to),
            phase: FadePhase::Ramping {
                since: now,
                span_ms: self.config.fade_span_ms,
            },
            on_complete: None,
        };
        let Some((record, driver)) = self.record_mut(pin) else {
            return;
        };
        record.drive_fade(fade, driver);
    }

    /// Hold a pin at `from` for `hold_s` seconds, then fade to `to` over
    /// the configured fade span
    ///
    /// When the fade finishes the pin is left in PWM mode at `to` and
    /// `on_complete` fires.
    pub fn fade_timed(
        &mut self,
        pin: PinId,
        from: i32,
        to: i32,
        hold_s: u32,
        on_complete: Option<C>,
    ) {
        let now = self.clock.now_ms();
        let fade = Fade {
            from: clamp_duty(from),
            to: clamp_duty(to),
            phase: FadePhase::Holding {
                since: now,
                hold_ms: seconds_to_ms(hold_s),
            },
            on_complete,
        };
        let Some((record, driver)) = self.record_mut(pin) else {
            return;
        };
        record.drive_fade(fade, driver);
    }

    /// Drop a pin's pending action without invoking its callback
    ///
    /// The output is left as it is. A fading pin stays at its current duty
    /// in PWM mode.
    pub fn cancel(&mut self, pin: PinId) {
        if let Some((record, _)) = self.record_mut(pin) {
            record.cancel();
        }
    }

    // --- Polling ---

    /// Advance every pending timer and fade
    ///
    /// Must be called frequently from the host's main loop. Pins without a
    /// pending action are not written. Pins are processed in construction
    /// order and each finished action fires its callback exactly once.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        let span_ms = self.config.fade_span_ms;

        for record in self.pins.iter_mut() {
            if !record.is_pending() {
                continue;
            }
            if let Some(on_complete) = record.advance(now, span_ms, &mut self.driver) {
                on_complete(record.id());
            }
        }
    }

    // --- Status ---

    /// Values of all managed pins, in construction order
    pub fn system_status(&self) -> SystemStatus<N> {
        let mut status = SystemStatus::new();
        for record in self.pins.iter() {
            status.push(record.id(), record.value());
        }
        status
    }

    /// Mode and value of one pin
    pub fn pin_status(&self, pin: PinId) -> PinStatus {
        match self.find(pin) {
            Some(record) => PinStatus::Managed {
                mode: record.mode(),
                value: record.value(),
            },
            None => PinStatus::NotManaged,
        }
    }

    /// Snapshot of one pin, if managed
    pub fn snapshot(&self, pin: PinId) -> Option<PinSnapshot> {
        self.find(pin).map(|r| r.snapshot())
    }

    /// Snapshots of all managed pins, in construction order
    pub fn pins(&self) -> impl Iterator<Item = PinSnapshot> + '_ {
        self.pins.iter().map(|r| r.snapshot())
    }

    /// Check if a pin is managed by this instance
    pub fn contains(&self, pin: PinId) -> bool {
        self.find(pin).is_some()
    }

    /// Check if a pin has a pending timed action or fade
    pub fn is_busy(&self, pin: PinId) -> bool {
        self.find(pin).is_some_and(|r| r.is_pending())
    }

    /// Number of managed pins
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Check if no pins are managed
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Get the configuration
    pub fn config(&self) -> &PinSetConfig {
        &self.config
    }

    /// Get the output driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get the output driver mutably
    ///
    /// Writing pins directly through the driver bypasses the manager's
    /// records, so status reports will no longer match the outputs.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Get the clock
    pub fn clock(&self) -> &K {
        &self.clock
    }
}
