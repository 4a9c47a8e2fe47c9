//! Control requests
//!
//! A request names a pin and an action, plus whichever parameters the
//! action needs:
//!
//! | action      | parameters                |
//! |-------------|---------------------------|
//! | `on`        |                           |
//! | `off`       |                           |
//! | `pulse`     | `level`, `seconds`        |
//! | `pwm`       | `value`                   |
//! | `pwm_pulse` | `value`, `seconds`        |
//! | `fade`      | `from`, `to`              |
//! | `fade_hold` | `from`, `to`, `seconds`   |
//!
//! Out-of-range duties are passed through; the manager clamps them.

use pinset_core::{Clock, Level, PinDriver, PinId, PinManager};
use serde::Deserialize;

use crate::error::ProtocolError;

/// Requested action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Action {
    On,
    Off,
    Pulse,
    Pwm,
    PwmPulse,
    Fade,
    FadeHold,
}

/// Control request as received on the wire
///
/// Parameters are optional at the wire level so one flat struct covers
/// every action. [`ControlRequest::command`] checks that the ones the
/// action needs are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRequest {
    pub pin: PinId,
    pub action: Action,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub from: Option<i32>,
    #[serde(default)]
    pub to: Option<i32>,
    #[serde(default)]
    pub seconds: Option<u32>,
}

/// A validated manager command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Digital(Level),
    Pulse { level: Level, seconds: u32 },
    Pwm(i32),
    PwmPulse { duty: i32, seconds: u32 },
    Fade { from: i32, to: i32 },
    FadeHold { from: i32, to: i32, seconds: u32 },
}

fn required<T>(field: Option<T>, name: &'static str) -> Result<T, ProtocolError> {
    field.ok_or(ProtocolError::MissingField(name))
}

impl ControlRequest {
    /// Parse a request from JSON
    pub fn parse(json: &[u8]) -> Result<Self, ProtocolError> {
        let (request, _) =
            serde_json_core::from_slice::<Self>(json).map_err(|_| ProtocolError::Malformed)?;
        Ok(request)
    }

    /// Resolve the action and its parameters into a command
    pub fn command(&self) -> Result<Command, ProtocolError> {
        let command = match self.action {
            Action::On => Command::Digital(Level::High),
            Action::Off => Command::Digital(Level::Low),
            Action::Pulse => Command::Pulse {
                level: required(self.level, "level")?,
                seconds: required(self.seconds, "seconds")?,
            },
            Action::Pwm => Command::Pwm(required(self.value, "value")?),
            Action::PwmPulse => Command::PwmPulse {
                duty: required(self.value, "value")?,
                seconds: required(self.seconds, "seconds")?,
            },
            Action::Fade => Command::Fade {
                from: required(self.from, "from")?,
                to: required(self.to, "to")?,
            },
            Action::FadeHold => Command::FadeHold {
                from: required(self.from, "from")?,
                to: required(self.to, "to")?,
                seconds: required(self.seconds, "seconds")?,
            },
        };
        Ok(command)
    }

    /// Validate the request and issue it to `manager`
    ///
    /// Timed actions are issued without a completion callback. Requests for
    /// pins the manager does not own are rejected before anything runs.
    pub fn apply<D, K, const N: usize, C>(
        &self,
        manager: &mut PinManager<D, K, N, C>,
    ) -> Result<Command, ProtocolError>
    where
        D: PinDriver,
        K: Clock,
        C: FnOnce(PinId),
    {
        if !manager.contains(self.pin) {
            return Err(ProtocolError::UnknownPin(self.pin));
        }

        let command = self.command()?;
        let pin = self.pin;
        match command {
            Command::Digital(level) => manager.set_digital(pin, level),
            Command::Pulse { level, seconds } => {
                manager.set_digital_timed(pin, level, seconds, None)
            }
            Command::Pwm(duty) => manager.set_pwm(pin, duty),
            Command::PwmPulse { duty, seconds } => manager.set_pwm_timed(pin, duty, seconds, None),
            Command::Fade { from, to } => manager.fade(pin, from, to),
            Command::FadeHold { from, to, seconds } => {
                manager.fade_timed(pin, from, to, seconds, None)
            }
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use pinset_core::{Mode, PinStatus, PinValue};

    struct NullDriver;

    impl PinDriver for NullDriver {
        fn configure_output(&mut self, _pin: PinId) {}
        fn write_digital(&mut self, _pin: PinId, _level: Level) {}
        fn write_analog(&mut self, _pin: PinId, _duty: u8) {}
    }

    #[derive(Default)]
    struct TestClock(Cell<u32>);

    impl Clock for TestClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    type Manager = PinManager<NullDriver, TestClock, 4>;

    fn manager() -> Manager {
        PinManager::with_defaults(NullDriver, TestClock::default(), &[2, 6]).unwrap()
    }

    fn run(m: &mut Manager, json: &str) -> Result<Command, ProtocolError> {
        ControlRequest::parse(json.as_bytes())?.apply(m)
    }

    #[test]
    fn test_parse_minimal() {
        let request = ControlRequest::parse(br#"{"pin":2,"action":"on"}"#).unwrap();
        assert_eq!(request.pin, 2);
        assert_eq!(request.action, Action::On);
        assert_eq!(request.level, None);
        assert_eq!(request.seconds, None);
    }

    #[test]
    fn test_parse_full() {
        let request = ControlRequest::parse(
            br#"{"pin":6,"action":"fade_hold","from":10,"to":200,"seconds":2}"#,
        )
        .unwrap();
        assert_eq!(
            request.command(),
            Ok(Command::FadeHold {
                from: 10,
                to: 200,
                seconds: 2
            })
        );
    }

    #[test]
    fn test_parse_level() {
        let request =
            ControlRequest::parse(br#"{"pin":2,"action":"pulse","level":"HIGH","seconds":5}"#)
                .unwrap();
        assert_eq!(
            request.command(),
            Ok(Command::Pulse {
                level: Level::High,
                seconds: 5
            })
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(
            ControlRequest::parse(b"{\"pin\":2"),
            Err(ProtocolError::Malformed)
        );
        assert_eq!(
            ControlRequest::parse(br#"{"pin":2,"action":"explode"}"#),
            Err(ProtocolError::Malformed)
        );
        assert_eq!(
            ControlRequest::parse(br#"{"action":"on"}"#),
            Err(ProtocolError::Malformed)
        );
    }

    #[test]
    fn test_missing_parameters() {
        let mut m = manager();
        assert_eq!(
            run(&mut m, r#"{"pin":6,"action":"pwm"}"#),
            Err(ProtocolError::MissingField("value"))
        );
        assert_eq!(
            run(&mut m, r#"{"pin":6,"action":"fade","from":0}"#),
            Err(ProtocolError::MissingField("to"))
        );
        assert_eq!(
            run(&mut m, r#"{"pin":2,"action":"pulse","level":"LOW"}"#),
            Err(ProtocolError::MissingField("seconds"))
        );
        // Nothing was applied
        assert_eq!(m.pin_status(6).mode(), Some(Mode::Digital));
    }

    #[test]
    fn test_unknown_pin_rejected() {
        let mut m = manager();
        assert_eq!(
            run(&mut m, r#"{"pin":13,"action":"on"}"#),
            Err(ProtocolError::UnknownPin(13))
        );
        assert_eq!(m.pin_status(13), PinStatus::NotManaged);
    }

    #[test]
    fn test_apply_on_off() {
        let mut m = manager();
        run(&mut m, r#"{"pin":2,"action":"on"}"#).unwrap();
        assert_eq!(m.pin_status(2).value(), Some(PinValue::Level(Level::High)));

        run(&mut m, r#"{"pin":2,"action":"off"}"#).unwrap();
        assert_eq!(m.pin_status(2).value(), Some(PinValue::Level(Level::Low)));
    }

    #[test]
    fn test_apply_pulse_reverts() {
        let mut m = manager();
        run(
            &mut m,
            r#"{"pin":2,"action":"pulse","level":"HIGH","seconds":5}"#,
        )
        .unwrap();
        assert!(m.is_busy(2));

        m.clock().0.set(5000);
        m.tick();
        assert_eq!(m.pin_status(2).value(), Some(PinValue::Level(Level::Low)));
        assert!(!m.is_busy(2));
    }

    #[test]
    fn test_apply_pwm_clamps() {
        let mut m = manager();
        run(&mut m, r#"{"pin":6,"action":"pwm","value":300}"#).unwrap();
        assert_eq!(
            m.pin_status(6),
            PinStatus::Managed {
                mode: Mode::Pwm,
                value: PinValue::Duty(255)
            }
        );
    }

    #[test]
    fn test_apply_pwm_pulse() {
        let mut m = manager();
        run(
            &mut m,
            r#"{"pin":6,"action":"pwm_pulse","value":100,"seconds":1}"#,
        )
        .unwrap();
        m.clock().0.set(1000);
        m.tick();
        assert_eq!(m.pin_status(6).value(), Some(PinValue::Duty(0)));
    }

    #[test]
    fn test_apply_fade() {
        let mut m = manager();
        run(&mut m, r#"{"pin":6,"action":"fade","from":0,"to":255}"#).unwrap();
        assert_eq!(m.pin_status(6).mode(), Some(Mode::Fading));

        m.clock().0.set(1000);
        m.tick();
        assert_eq!(
            m.pin_status(6),
            PinStatus::Managed {
                mode: Mode::Pwm,
                value: PinValue::Duty(255)
            }
        );
    }

    #[test]
    fn test_apply_fade_hold() {
        let mut m = manager();
        let command = run(
            &mut m,
            r#"{"pin":6,"action":"fade_hold","from":10,"to":200,"seconds":2}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::FadeHold {
                from: 10,
                to: 200,
                seconds: 2
            }
        );
        assert_eq!(m.pin_status(6).value(), Some(PinValue::Duty(10)));

        // Held at the start duty
        m.clock().0.set(1500);
        m.tick();
        assert_eq!(
            m.pin_status(6),
            PinStatus::Managed {
                mode: Mode::Fading,
                value: PinValue::Duty(10)
            }
        );

        // Ramp starts when the hold ends
        m.clock().0.set(2000);
        m.tick();
        m.clock().0.set(2500);
        m.tick();
        assert_eq!(m.pin_status(6).value(), Some(PinValue::Duty(105)));

        m.clock().0.set(3000);
        m.tick();
        assert_eq!(
            m.pin_status(6),
            PinStatus::Managed {
                mode: Mode::Pwm,
                value: PinValue::Duty(200)
            }
        );
        assert!(!m.is_busy(6));
    }
}
