//! Coarse progress notifications out of the trial loop.

/// Receives completion percentages while a run is in progress.
///
/// Called synchronously from inside the trial loop, so implementations must
/// return quickly and must not block.
pub trait ProgressObserver {
    fn on_progress(&mut self, percent: u8);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _percent: u8) {}
}

impl<F: FnMut(u8)> ProgressObserver for F {
    fn on_progress(&mut self, percent: u8) {
        self(percent)
    }
}

/// Decides when a trial index warrants a notification.
///
/// Checks happen every `interval` trials; a percentage is only forwarded when
/// it is larger than the last one sent.
#[derive(Debug, Clone)]
pub(crate) struct ProgressTracker {
    total: u64,
    interval: u64,
    last_sent: u8,
}

impl ProgressTracker {
    pub(crate) fn new(total: u64, interval: u64) -> Self {
        Self {
            total,
            interval: interval.max(1),
            last_sent: 0,
        }
    }

    /// Percentage to report after finishing trial `index`, if any.
    pub(crate) fn check(&mut self, index: u64) -> Option<u8> {
        if index % self.interval != 0 || self.total == 0 {
            return None;
        }
        let percent = ((index as u128 * 100) / self.total as u128).min(100) as u8;
        if percent > self.last_sent {
            self.last_sent = percent;
            Some(percent)
        } else {
            None
        }
    }
}
