//! Frame clock
//!
//! Turns absolute frame timestamps (milliseconds, e.g. `performance.now()`)
//! into per-frame deltas. The first frame after construction or `reset`
//! yields zero; `rebase` makes the next delta start from a given instant so a
//! pause never leaks into the simulation.

/// Time base for the session
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame, in milliseconds
    pub fn advance(&mut self, now: f64) -> f64 {
        let last = self.last.replace(now).unwrap_or(now);
        now - last
    }

    /// Next delta is measured from `now`
    pub fn rebase(&mut self, now: f64) {
        self.last = Some(now);
    }

    /// Forget the previous frame entirely
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last_frame(&self) -> Option<f64> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.5), 0.0);
        assert_eq!(clock.advance(1251.0), 16.5);
    }

    #[test]
    fn test_rebase_skips_gap() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        clock.rebase(10_000.0);
        assert_eq!(clock.advance(10_016.0), 16.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        clock.reset();
        assert_eq!(clock.last_frame(), None);
        assert_eq!(clock.advance(500.0), 0.0);
    }
}
