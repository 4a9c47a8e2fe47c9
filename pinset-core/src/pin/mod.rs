//! Per-pin drive state
//!
//! The state record for a single managed pin and the fade math it uses.

pub mod fade;
pub(crate) mod record;

pub use fade::{interpolate, FadePhase};
