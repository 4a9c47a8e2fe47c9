//! Embassy async tasks

pub mod pins;

pub use pins::{pins_task, PinSet};
