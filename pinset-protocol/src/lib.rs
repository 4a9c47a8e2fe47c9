//! JSON status and control messages
//!
//! This crate renders the manager's status projection as compact JSON and
//! parses control requests into manager commands. It is the layer a web or
//! serial surface sits on; it owns no state of its own.
//!
//! # Message Overview
//!
//! ```text
//! status (all pins)   {"2":"HIGH","6":"88"}
//! status (one pin)    {"mode":"digital","value":"HIGH"}
//! status (unknown)    {"error":"Pin not managed by this instance"}
//! control             {"pin":2,"action":"pulse","level":"HIGH","seconds":5}
//! ```
//!
//! All rendering writes into a caller-provided buffer; nothing allocates.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod error;
pub mod status;

pub use command::{Action, Command, ControlRequest};
pub use error::ProtocolError;
pub use status::{render_pin, render_system, NOT_MANAGED_MESSAGE};
