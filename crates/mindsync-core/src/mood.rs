//! Mood check-in state machine.
//!
//! `Idle` until the first check-in completes, then `HasResult` forever after;
//! each completed submission overwrites the previous result.

use tracing::{debug, warn};

use crate::api::MoodResult;
use crate::error::RequestError;
use crate::flow::{Completion, Sequence};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MoodState {
    #[default]
    Idle,
    HasResult(MoodResult),
}

#[derive(Debug, Clone, Default)]
pub struct MoodCheckin {
    state: MoodState,
    seq: Sequence,
}

impl MoodCheckin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new submission and return its sequence number.
    pub fn submit(&mut self) -> u64 {
        self.seq.next()
    }

    /// Hand back the classification result for submission `seq`.
    ///
    /// A failure of the latest submission shows the neutral placeholder.
    pub fn complete(&mut self, seq: u64, result: Result<MoodResult, RequestError>) -> Completion {
        if !self.seq.is_latest(seq) {
            debug!(seq, latest = self.seq.latest(), "dropping stale mood response");
            return Completion::Stale;
        }
        match result {
            Ok(mood) => {
                self.state = MoodState::HasResult(mood);
                Completion::Applied
            }
            Err(err) => {
                warn!(error = %err, "mood detection failed, using neutral");
                self.state = MoodState::HasResult(MoodResult::neutral());
                Completion::Failed
            }
        }
    }

    pub fn state(&self) -> &MoodState {
        &self.state
    }

    pub fn current(&self) -> Option<&MoodResult> {
        match &self.state {
            MoodState::Idle => None,
            MoodState::HasResult(mood) => Some(mood),
        }
    }

    /// Label to send with a schedule request: lowercased, `neutral` if idle.
    pub fn label_for_schedule(&self) -> String {
        self.current()
            .map(|m| m.label.trim())
            .filter(|l| !l.is_empty())
            .unwrap_or("neutral")
            .to_lowercase()
    }
}
