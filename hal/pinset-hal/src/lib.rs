//! pinset Hardware Abstraction Layer
//!
//! This crate defines the small set of platform capabilities the pin
//! manager needs. Chip-specific crates (or the generic `embedded-hal`
//! adapter in `pinset-drivers`) implement them, so the same application
//! logic runs on real hardware and against recording fakes on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pinset-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinset-core (PinManager)               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinset-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ pinset-drivers│       │   test fakes  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::PinDriver`] - Configure and drive output pins (digital + PWM)
//! - [`time::Clock`] - Monotonic millisecond time source

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key items at crate root for convenience
pub use gpio::{Level, PinDriver, PinId};
pub use time::{elapsed_ms, Clock};
