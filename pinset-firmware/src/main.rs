//! pinset demo firmware
//!
//! Drives three outputs on an RP2040 board through one pin manager:
//! the onboard LED (GPIO25) and two external channels (GPIO2, GPIO6).
//! All three are PWM channels, so each can be used digitally or faded.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use pinset_core::{Level, PinId, PinManager};
use pinset_drivers::DutyCycleBank;
use pinset_protocol::ControlRequest;

mod clock;
mod tasks;

use crate::clock::EmbassyClock;
use crate::tasks::{pins_task, PinSet};

const LED_PIN: PinId = 25;
const RELAY_PIN: PinId = 2;
const DIMMER_PIN: PinId = 6;

/// Control request issued at startup
const STARTUP_REQUEST: &[u8] =
    br#"{"pin":6,"action":"fade_hold","from":10,"to":200,"seconds":2}"#;

fn on_pulse_done(pin: PinId) {
    info!("Pulse on pin {} complete", pin);
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pinset firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // ~1 kHz at 125 MHz
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = 999;
    pwm_config.divider = 125.into();

    // GPIO25 is slice 4 channel B, GPIO2 slice 1 A, GPIO6 slice 3 A
    let (_, led) = Pwm::new_output_b(p.PWM_SLICE4, p.PIN_25, pwm_config.clone()).split();
    let (relay, _) = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, pwm_config.clone()).split();
    let (dimmer, _) = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, pwm_config).split();

    let mut bank = DutyCycleBank::new();
    for (pin, output) in [(LED_PIN, led), (RELAY_PIN, relay), (DIMMER_PIN, dimmer)] {
        let Some(output) = output else {
            error!("No PWM output for pin {}", pin);
            continue;
        };
        if let Err(e) = bank.add(pin, output) {
            error!("Failed to register pin {}: {}", pin, e);
        }
    }

    let mut pins: PinSet =
        match PinManager::with_defaults(bank, EmbassyClock, &[LED_PIN, RELAY_PIN, DIMMER_PIN]) {
            Ok(pins) => pins,
            Err(e) => {
                error!("Pin manager init failed: {}", e);
                return;
            }
        };
    info!("Managing {} pins", pins.len());

    // Demo: 5 s pulse on the LED, fade with hold on the dimmer
    pins.set_digital_timed(LED_PIN, Level::High, 5, Some(on_pulse_done as fn(PinId)));
    match ControlRequest::parse(STARTUP_REQUEST).and_then(|request| request.apply(&mut pins)) {
        Ok(command) => info!("Startup command: {}", command),
        Err(e) => warn!("Startup request rejected: {}", e),
    }

    spawner.spawn(pins_task(pins)).unwrap();
    info!("Tasks spawned");
}
