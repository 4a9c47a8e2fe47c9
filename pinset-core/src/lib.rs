//! Board-agnostic core logic for managing a set of output pins
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Per-pin drive state machine (digital, PWM, fading)
//! - One-shot timed actions with completion callbacks
//! - The cooperative `tick()` poll loop
//! - Status projection for outer surfaces
//! - Configuration type definitions
//!
//! Hardware access goes through the traits in `pinset-hal`, re-exported
//! here for convenience.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod manager;
pub mod pin;
pub mod status;

pub use config::{PinSetConfig, DEFAULT_FADE_SPAN_MS, MAX_DUTY};
pub use error::PinSetError;
pub use manager::PinManager;
pub use pin::{interpolate, FadePhase};
pub use status::{Mode, PinSnapshot, PinStatus, PinValue, SystemStatus};

pub use pinset_hal::{Clock, Level, PinDriver, PinId};
