use std::time::{Duration, Instant};

/// One frame at 60 Hz, truncated to whole nanoseconds.
pub const FRAME_INTERVAL_60HZ: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Caps the draw rate to one frame per `interval`.
///
/// A frame is due once `interval` has elapsed since the last drawn frame (or
/// since the throttle was created). The reference time moves to the moment the
/// frame was actually drawn, so a late frame is not followed by a burst of
/// catch-up frames.
///
/// The runtime sleeps until [`deadline`](Self::deadline) instead of spinning.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    interval: Duration,
    last: Instant,
}

impl FrameThrottle {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self { interval, last: start }
    }

    /// Earliest instant at which the next frame is due.
    pub fn deadline(&self) -> Instant {
        self.last + self.interval
    }

    /// Whether a frame may be drawn at `now`. Does not consume the frame.
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last) >= self.interval
    }

    /// Claims the frame at `now` if it is due.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_FRAME: Duration = Duration::from_nanos(1_000_000_000 / 120);

    #[test]
    fn first_frame_waits_one_interval() {
        let t0 = Instant::now();
        let mut throttle = FrameThrottle::new(FRAME_INTERVAL_60HZ, t0);
        assert!(!throttle.try_begin(t0));
        assert!(!throttle.try_begin(t0 + HALF_FRAME));
        assert!(throttle.try_begin(t0 + HALF_FRAME * 2));
    }

    #[test]
    fn at_most_one_frame_per_two_half_frame_polls() {
        let t0 = Instant::now();
        let mut throttle = FrameThrottle::new(FRAME_INTERVAL_60HZ, t0);

        let drawn: Vec<bool> = (1..=120u32)
            .map(|i| throttle.try_begin(t0 + HALF_FRAME * i))
            .collect();

        assert!(drawn.windows(2).all(|w| !(w[0] && w[1])));
        assert_eq!(drawn.iter().filter(|&&d| d).count(), 60);
    }

    #[test]
    fn late_frame_does_not_burst() {
        let t0 = Instant::now();
        let mut throttle = FrameThrottle::new(FRAME_INTERVAL_60HZ, t0);

        let late = t0 + FRAME_INTERVAL_60HZ * 5;
        assert!(throttle.try_begin(late));
        assert!(!throttle.try_begin(late + Duration::from_millis(1)));
        assert_eq!(throttle.deadline(), late + FRAME_INTERVAL_60HZ);
    }

    #[test]
    fn is_due_does_not_consume() {
        let t0 = Instant::now();
        let throttle = FrameThrottle::new(FRAME_INTERVAL_60HZ, t0);
        let t = t0 + FRAME_INTERVAL_60HZ;
        assert!(throttle.is_due(t));
        assert!(throttle.is_due(t));
    }
}
