//! Monotonic time source
//!
//! Timestamps are milliseconds in a `u32` that wraps after ~49.7 days.
//! Always compare them with [`elapsed_ms`], never with `<`/`>`.

/// Monotonic millisecond clock
pub trait Clock {
    /// Current time in milliseconds since an arbitrary epoch (wrapping)
    fn now_ms(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, tolerant of one wrap
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_simple() {
        assert_eq!(elapsed_ms(1500, 500), 1000);
        assert_eq!(elapsed_ms(500, 500), 0);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let since = u32::MAX - 99;
        assert_eq!(elapsed_ms(100, since), 200);
    }
}
