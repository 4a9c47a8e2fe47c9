//! Fade phases and interpolation
//!
//! A fade optionally holds its start duty for a while, then ramps linearly
//! to its end duty over a fixed span.

use pinset_hal::elapsed_ms;

/// Phase of an active fade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadePhase {
    /// Output pinned at the start duty until the hold elapses
    Holding { since: u32, hold_ms: u32 },
    /// Output interpolating from start to end duty
    Ramping { since: u32, span_ms: u32 },
}

/// What a fade wants written after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FadeStep {
    /// Re-assert the start duty
    Hold,
    /// Write an intermediate duty
    Ramp(u8),
    /// Ramp finished, snap to the end duty
    Done,
}

/// An armed fade with its optional completion callback
pub(crate) struct Fade<C> {
    pub from: u8,
    pub to: u8,
    pub phase: FadePhase,
    pub on_complete: Option<C>,
}

impl<C> Fade<C> {
    /// Advance the fade to `now`
    ///
    /// When a hold expires the ramp starts at `now` with `span_ms`.
    pub fn step(&mut self, now: u32, span_ms: u32) -> FadeStep {
        match self.phase {
            FadePhase::Holding { since, hold_ms } => {
                if elapsed_ms(now, since) >= hold_ms {
                    self.phase = FadePhase::Ramping {
                        since: now,
                        span_ms,
                    };
                }
                FadeStep::Hold
            }
            FadePhase::Ramping { since, span_ms } => {
                let elapsed = elapsed_ms(now, since);
                if elapsed >= span_ms {
                    FadeStep::Done
                } else {
                    FadeStep::Ramp(interpolate(self.from, self.to, elapsed, span_ms))
                }
            }
        }
    }
}

/// Linear interpolation between two duties, truncated towards zero
///
/// `elapsed` past `span_ms` yields `to`.
pub fn interpolate(from: u8, to: u8, elapsed: u32, span_ms: u32) -> u8 {
    if span_ms == 0 || elapsed >= span_ms {
        return to;
    }
    let span = span_ms as i64;
    let delta = to as i64 - from as i64;
    // The numerator stays non-negative because the result lies between
    // `from` and `to`, so integer division truncates like a float cast
    let scaled = from as i64 * span + elapsed as i64 * delta;
    (scaled / span).clamp(0, u8::MAX as i64) as u8
}
