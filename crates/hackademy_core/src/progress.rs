//! Stage cursor, solved flag, and mentor review gating.
//!
//! Every stage change bumps an epoch. Review requests carry the epoch they were
//! issued in, and replies from an older epoch are dropped so feedback for a
//! previous stage never lands on the current one.

use crate::error::CoreError;
use crate::stage::{Stage, StageProvider};
use tracing::{debug, info};

/// Ask the mentor to review a freshly solved mission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRequest {
    pub epoch: u64,
    pub code: String,
    pub mission: String,
}

/// Progress through a [`StageProvider`].
#[derive(Debug)]
pub struct MissionProgress<P> {
    provider: P,
    index: usize,
    epoch: u64,
    solved: bool,
    feedback: Option<String>,
}

impl<P: StageProvider> MissionProgress<P> {
    /// Start at the first stage.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCurriculum`] when the provider has no stages.
    pub fn new(provider: P) -> Result<Self, CoreError> {
        if provider.stages().is_empty() {
            return Err(CoreError::EmptyCurriculum);
        }
        Ok(Self {
            provider,
            index: 0,
            epoch: 0,
            solved: false,
            feedback: None,
        })
    }

    pub fn current_stage(&self) -> &Stage {
        &self.provider.stages()[self.index]
    }

    /// Zero-based position of the current stage.
    pub fn stage_index(&self) -> usize {
        self.index
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Latest accepted mentor review for this stage.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn is_last_stage(&self) -> bool {
        self.index + 1 >= self.provider.stages().len()
    }

    /// Re-validate after an edit.
    ///
    /// # Returns
    /// A review request when the code just went from unsolved to solved.
    /// Breaking a solved mission clears the flag, so solving it again asks
    /// for another review.
    pub fn on_buffer_change(&mut self, code: &str) -> Option<ReviewRequest> {
        let stage = self.current_stage();
        let solved = stage.validate(code);
        let mission = stage.mission;
        let was_solved = std::mem::replace(&mut self.solved, solved);
        match (was_solved, solved) {
            (false, true) => {
                info!(stage = %self.current_stage().id, epoch = self.epoch, "mission solved");
                Some(ReviewRequest {
                    epoch: self.epoch,
                    code: code.to_string(),
                    mission: mission.to_string(),
                })
            }
            (true, false) => {
                debug!(stage = %self.current_stage().id, "mission no longer solved");
                None
            }
            _ => None,
        }
    }

    /// Move to the next stage, if any.
    ///
    /// # Returns
    /// The new stage, or `None` when already on the last one.
    pub fn advance(&mut self) -> Option<&Stage> {
        if self.is_last_stage() {
            return None;
        }
        self.index += 1;
        self.epoch += 1;
        self.solved = false;
        self.feedback = None;
        info!(stage = %self.current_stage().id, epoch = self.epoch, "stage advanced");
        Some(self.current_stage())
    }

    /// Store a mentor review issued in `epoch`.
    ///
    /// # Returns
    /// `false` when the review belongs to an earlier stage and was dropped.
    pub fn accept_feedback(&mut self, epoch: u64, text: impl Into<String>) -> bool {
        if epoch != self.epoch {
            debug!(reply = epoch, current = self.epoch, "stale review dropped");
            return false;
        }
        self.feedback = Some(text.into());
        true
    }
}
