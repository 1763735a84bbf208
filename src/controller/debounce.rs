use std::time::Duration;

use crate::text::is_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledGeneration {
    sequence: u64,
    delay: Duration,
}

impl ScheduledGeneration {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Coalesces text edits into a single delayed generation. Each edit
/// supersedes the previously scheduled one; blank text cancels it.
#[derive(Debug, Clone)]
pub struct AutoGenerateGate {
    enabled: bool,
    delay: Duration,
    sequence: u64,
}

impl AutoGenerateGate {
    pub fn new(enabled: bool, delay: Duration) -> Self {
        Self {
            enabled,
            delay,
            sequence: 0,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn on_text_changed(&mut self, text: &str) -> Option<ScheduledGeneration> {
        if !self.enabled {
            return None;
        }
        self.sequence = self.sequence.saturating_add(1);
        if is_blank(text) {
            return None;
        }
        Some(ScheduledGeneration {
            sequence: self.sequence,
            delay: self.delay,
        })
    }

    pub fn is_current(&self, scheduled: ScheduledGeneration) -> bool {
        self.enabled && scheduled.sequence == self.sequence
    }

    pub fn cancel(&mut self) {
        self.sequence = self.sequence.saturating_add(1);
    }
}
