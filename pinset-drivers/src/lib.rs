//! Output driver implementations
//!
//! This crate provides concrete implementations of the `PinDriver` trait
//! defined in pinset-hal:
//!
//! - Duty-cycle bank over `embedded_hal::pwm::SetDutyCycle` channels

#![no_std]
#![deny(unsafe_code)]

pub mod bank;

pub use bank::{BankError, DutyCycleBank, Polarity};
