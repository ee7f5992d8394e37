use std::time::{Duration, Instant};

/// Default spacing between frames (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Throttles redraws to a fixed interval.
///
/// The next deadline is measured from the end of the previous frame, so a slow
/// frame is followed by a full interval of idle time rather than a catch-up
/// burst. Timestamps are passed in so the pacer stays deterministic under test.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    deadline: Instant,
    requested: bool,
    frame_index: u64,
}

impl FramePacer {
    /// Creates a pacer whose first frame is due at `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            deadline: now,
            requested: false,
            frame_index: 0,
        }
    }

    /// Returns `true` once per interval, when a redraw should be requested.
    ///
    /// Stays `false` until [`frame_done`](Self::frame_done) is called for the
    /// requested frame.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.requested || now < self.deadline {
            return false;
        }
        self.requested = true;
        true
    }

    /// Records a finished (presented or skipped) frame.
    pub fn frame_done(&mut self, now: Instant) {
        self.requested = false;
        self.deadline = now + self.interval;
        self.frame_index = self.frame_index.wrapping_add(1);
    }

    /// A redraw was requested and its frame has not finished yet.
    #[inline]
    pub fn redraw_pending(&self) -> bool {
        self.requested
    }

    /// When the event loop should wake up next.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Number of frames finished so far.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn first_frame_is_due_immediately() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(DEFAULT_FRAME_INTERVAL, t0);
        assert!(pacer.poll(t0));
    }

    #[test]
    fn poll_fires_once_until_frame_done() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(16 * MS, t0);
        assert!(pacer.poll(t0));
        assert!(pacer.redraw_pending());
        assert!(!pacer.poll(t0));
        assert!(!pacer.poll(t0 + 100 * MS));

        pacer.frame_done(t0 + 100 * MS);
        assert!(!pacer.redraw_pending());
    }

    #[test]
    fn next_deadline_counts_from_frame_end() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(16 * MS, t0);
        assert!(pacer.poll(t0));

        // Frame took 5ms.
        pacer.frame_done(t0 + 5 * MS);
        assert_eq!(pacer.deadline(), t0 + 21 * MS);
        assert!(!pacer.poll(t0 + 20 * MS));
        assert!(pacer.poll(t0 + 21 * MS));
        assert_eq!(pacer.frame_index(), 1);
    }

    #[test]
    fn late_wakeup_does_not_burst() {
        let t0 = Instant::now();
        let mut pacer = FramePacer::new(16 * MS, t0);
        assert!(pacer.poll(t0));
        pacer.frame_done(t0);

        // Woke up three intervals late: still only one redraw.
        let late = t0 + 48 * MS;
        assert!(pacer.poll(late));
        assert!(!pacer.poll(late));
    }
}
