//! Per-conversation state: the current step and the draft profile.

use serde::{Deserialize, Serialize};

use super::step::ConversationStep;
use crate::domain::foundation::{SessionId, StateMachine, StateTransitionError};
use crate::domain::valuation::ProfileDraft;

/// Everything one conversation remembers between inputs.
///
/// Owned exclusively by its engine. Restarting replaces the whole value,
/// so nothing from an earlier profile survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    session_id: SessionId,
    step: ConversationStep,
    profile: ProfileDraft,
}

impl ConversationState {
    /// Fresh state awaiting the area, with a newly minted session id.
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            step: ConversationStep::default(),
            profile: ProfileDraft::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn step(&self) -> ConversationStep {
        self.step
    }

    pub fn profile(&self) -> &ProfileDraft {
        &self.profile
    }

    pub(crate) fn profile_mut(&mut self) -> &mut ProfileDraft {
        &mut self.profile
    }

    /// Moves to `target` if the step machine allows it.
    pub fn advance(&mut self, target: ConversationStep) -> Result<(), StateTransitionError> {
        self.step = self.step.transition_to(target)?;
        Ok(())
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
