//! Per-pin state machine
//!
//! Each managed pin is in exactly one drive mode. The pending action, if
//! any, lives inside the mode it belongs to, so a digital pin can never
//! carry fade endpoints and a fading pin can never carry a revert target.
//!
//! Replacing the drive state drops whatever action was pending, including
//! its callback. Dropping is cancellation: the callback is never invoked.

use pinset_hal::{elapsed_ms, Level, PinDriver, PinId};

use super::fade::{Fade, FadeStep};
use crate::status::{Mode, PinSnapshot, PinValue};

/// A one-shot action that applies `target` once `duration_ms` has elapsed
pub(crate) struct Pending<T, C> {
    pub armed_at: u32,
    pub duration_ms: u32,
    pub target: T,
    pub on_complete: Option<C>,
}

impl<T, C> Pending<T, C> {
    pub fn new(armed_at: u32, duration_ms: u32, target: T, on_complete: Option<C>) -> Self {
        Self {
            armed_at,
            duration_ms,
            target,
            on_complete,
        }
    }

    fn is_due(&self, now: u32) -> bool {
        elapsed_ms(now, self.armed_at) >= self.duration_ms
    }
}

/// Drive mode with its mode-specific payload
pub(crate) enum Drive<C> {
    Digital {
        level: Level,
        revert: Option<Pending<Level, C>>,
    },
    Pwm {
        duty: u8,
        revert: Option<Pending<u8, C>>,
    },
    Fading {
        duty: u8,
        fade: Fade<C>,
    },
}

/// State record for one managed pin
pub(crate) struct PinRecord<C> {
    id: PinId,
    drive: Drive<C>,
}

impl<C: FnOnce(PinId)> PinRecord<C> {
    /// Create a record and drive the pin low
    pub fn new<D: PinDriver>(id: PinId, driver: &mut D) -> Self {
        driver.configure_output(id);
        driver.write_digital(id, Level::Low);
        Self {
            id,
            drive: Drive::Digital {
                level: Level::Low,
                revert: None,
            },
        }
    }

    pub fn id(&self) -> PinId {
        self.id
    }

    pub fn mode(&self) -> Mode {
        match self.drive {
            Drive::Digital { .. } => Mode::Digital,
            Drive::Pwm { .. } => Mode::Pwm,
            Drive::Fading { .. } => Mode::Fading,
        }
    }

    pub fn value(&self) -> PinValue {
        match self.drive {
            Drive::Digital { level, .. } => PinValue::Level(level),
            Drive::Pwm { duty, .. } | Drive::Fading { duty, .. } => PinValue::Duty(duty),
        }
    }

    /// Whether a timed action or fade is outstanding
    pub fn is_pending(&self) -> bool {
        match &self.drive {
            Drive::Digital { revert, .. } => revert.is_some(),
            Drive::Pwm { revert, .. } => revert.is_some(),
            Drive::Fading { .. } => true,
        }
    }

    pub fn snapshot(&self) -> PinSnapshot {
        PinSnapshot {
            id: self.id,
            mode: self.mode(),
            value: self.value(),
            pending: self.is_pending(),
        }
    }

    /// Switch to digital mode and write `level`
    ///
    /// Pins coming from PWM or fading are reconfigured as plain outputs.
    pub fn drive_digital<D: PinDriver>(
        &mut self,
        level: Level,
        revert: Option<Pending<Level, C>>,
        driver: &mut D,
    ) {
        if !matches!(self.drive, Drive::Digital { .. }) {
            driver.configure_output(self.id);
        }
        self.drive = Drive::Digital { level, revert };
        driver.write_digital(self.id, level);
    }

    /// Switch to PWM mode and write `duty`
    pub fn drive_pwm<D: PinDriver>(
        &mut self,
        duty: u8,
        revert: Option<Pending<u8, C>>,
        driver: &mut D,
    ) {
        self.drive = Drive::Pwm { duty, revert };
        driver.write_analog(self.id, duty);
    }

    /// Switch to fading mode and write the start duty
    pub fn drive_fade<D: PinDriver>(&mut self, fade: Fade<C>, driver: &mut D) {
        let duty = fade.from;
        self.drive = Drive::Fading { duty, fade };
        driver.write_analog(self.id, duty);
    }

    /// Drop any pending action without touching the output
    ///
    /// A fading pin stays at its current duty in PWM mode.
    pub fn cancel(&mut self) {
        match &mut self.drive {
            Drive::Digital { revert, .. } => *revert = None,
            Drive::Pwm { revert, .. } => *revert = None,
            Drive::Fading { duty, .. } => {
                self.drive = Drive::Pwm {
                    duty: *duty,
                    revert: None,
                }
            }
        }
    }

    /// Advance the pending action to `now`
    ///
    /// Returns the completion callback if the action finished on this
    /// tick. The caller is responsible for invoking it.
    pub fn advance<D: PinDriver>(&mut self, now: u32, span_ms: u32, driver: &mut D) -> Option<C> {
        let id = self.id;
        let finished = match &mut self.drive {
            Drive::Digital { level, revert } => {
                let pending = take_if_due(revert, now)?;
                *level = pending.target;
                driver.write_digital(id, pending.target);
                return pending.on_complete;
            }
            Drive::Pwm { duty, revert } => {
                let pending = take_if_due(revert, now)?;
                *duty = pending.target;
                driver.write_analog(id, pending.target);
                return pending.on_complete;
            }
            Drive::Fading { duty, fade } => match fade.step(now, span_ms) {
                FadeStep::Hold => {
                    *duty = fade.from;
                    driver.write_analog(id, fade.from);
                    return None;
                }
                FadeStep::Ramp(value) => {
                    *duty = value;
                    driver.write_analog(id, value);
                    return None;
                }
                FadeStep::Done => (fade.to, fade.on_complete.take()),
            },
        };

        let (to, on_complete) = finished;
        self.drive = Drive::Pwm {
            duty: to,
            revert: None,
        };
        driver.write_analog(id, to);
        on_complete
    }
}

fn take_if_due<T, C>(slot: &mut Option<Pending<T, C>>, now: u32) -> Option<Pending<T, C>> {
    if slot.as_ref()?.is_due(now) {
        slot.take()
    } else {
        None
    }
}
