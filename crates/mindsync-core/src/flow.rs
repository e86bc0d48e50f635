//! Submission sequencing shared by the mood and schedule flows.
//!
//! Every submission takes the next number from its flow's [`Sequence`]. When
//! the response comes back it may only touch state if no newer submission
//! has been issued since; otherwise it is dropped.

/// What happened to a response handed back to a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was the latest and its payload is now displayed.
    Applied,
    /// The latest request failed; state was reset to the failure default.
    Failed,
    /// A newer submission exists; the response was discarded.
    Stale,
}

impl Completion {
    /// Whether the caller should raise a user-visible alert.
    pub fn needs_alert(self) -> bool {
        matches!(self, Completion::Failed)
    }
}

/// Monotonic per-flow submission counter.
#[derive(Debug, Default, Clone)]
pub struct Sequence {
    latest: u64,
}

impl Sequence {
    /// Issue the number for a new submission.
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether `seq` is the most recently issued number.
    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
