//! State machine trait for step enums.
//!
//! Gives every step enum the same checked-transition interface, so an
//! illegal jump between conversation steps surfaces as an error instead
//! of silently corrupting the session.

use thiserror::Error;

/// Attempted a transition that the state machine does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot transition from {from} to {to}")]
pub struct StateTransitionError {
    pub from: String,
    pub to: String,
}

/// Trait for enums that represent state machines.
///
/// Implementors list their legal transitions and get a validated
/// `transition_to` for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ConversationStep {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (AwaitingArea, AwaitingRooms) | /* ... */)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             AwaitingArea => vec![AwaitingRooms],
///             // ...
///         }
///     }
/// }
///
/// let next = step.transition_to(ConversationStep::AwaitingRooms)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, StateTransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(StateTransitionError {
                from: format!("{:?}", self),
                to: format!("{:?}", target),
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
