use std::time::Duration;

use derive_setters::Setters;

/// Batching heuristic for reparses.
///
/// Short deltas, typical of token-by-token generation, are batched
/// `batch_size` at a time; any delta longer than `long_delta_threshold`
/// characters triggers a reparse on its own.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct SchedulePolicy {
    pub batch_size: u64,
    pub long_delta_threshold: usize,
    /// Pause after a batched reparse before the next delta is processed.
    pub pacing: Duration,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self { batch_size: 3, long_delta_threshold: 10, pacing: Duration::from_millis(30) }
    }
}

/// Outcome of appending one delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Keep accumulating.
    Hold,
    /// The batch is full: reparse, then pause for the pacing delay.
    Batch,
    /// The delta alone is long enough: reparse without pausing.
    LongDelta,
}

impl Trigger {
    pub fn should_reparse(self) -> bool {
        !matches!(self, Self::Hold)
    }
}

/// Owns the accumulated text of one message and decides after every delta
/// whether it is worth a reparse.
#[derive(Debug, Clone, Default)]
pub struct UpdateScheduler {
    policy: SchedulePolicy,
    text: String,
    update_count: u64,
}

impl UpdateScheduler {
    pub fn new(policy: SchedulePolicy) -> Self {
        Self { policy, text: String::new(), update_count: 0 }
    }

    /// Append a delta and evaluate the trigger policy.
    ///
    /// The batch check comes first, so a long delta that also completes a
    /// batch still counts as a batch and keeps the pacing delay.
    pub fn push(&mut self, delta: &str) -> Trigger {
        self.text.push_str(delta);
        self.update_count += 1;

        if self.policy.batch_size > 0 && self.update_count % self.policy.batch_size == 0 {
            Trigger::Batch
        } else if delta.chars().count() > self.policy.long_delta_threshold {
            Trigger::LongDelta
        } else {
            Trigger::Hold
        }
    }

    /// Full text received so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Pacing delay to honour after `trigger`, if any.
    pub fn pacing_after(&self, trigger: Trigger) -> Option<Duration> {
        match trigger {
            Trigger::Batch if !self.policy.pacing.is_zero() => Some(self.policy.pacing),
            _ => None,
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
