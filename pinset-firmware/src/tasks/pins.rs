//! Pin polling task
//!
//! Owns the pin manager and drives it with a fixed-rate ticker:
//! - Advances timed actions and fades every tick
//! - Logs the system status once per second

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Ticker};
use pinset_core::PinManager;
use pinset_drivers::DutyCycleBank;
use pinset_protocol::render_system;

use crate::clock::EmbassyClock;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 10;

/// Ticks between status reports
const STATUS_EVERY_TICKS: u32 = 1000 / TICK_INTERVAL_MS;

/// Number of managed pins
pub const PIN_COUNT: usize = 3;

/// The concrete manager type for this board
pub type PinSet =
    PinManager<DutyCycleBank<PwmOutput<'static>, PIN_COUNT>, EmbassyClock, PIN_COUNT>;

/// Pin task - polls the manager and reports status
#[embassy_executor::task]
pub async fn pins_task(mut pins: PinSet) {
    info!("Pin task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));
    let mut ticks: u32 = 0;
    let mut buf = [0u8; 64];
    let mut faults = 0;

    loop {
        ticker.next().await;
        pins.tick();

        let seen = pins.driver().fault_count();
        if seen != faults {
            warn!("PWM write faults: {}", seen);
            faults = seen;
        }

        ticks = ticks.wrapping_add(1);
        if ticks % STATUS_EVERY_TICKS == 0 {
            match render_system(&pins.system_status(), &mut buf) {
                Ok(json) => info!("status {}", json),
                Err(e) => warn!("status render failed: {}", e),
            }
        }
    }
}
