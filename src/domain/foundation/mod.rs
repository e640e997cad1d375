//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the state machine trait and the validation error
//! type that form the vocabulary of the valuation domain.

mod errors;
mod ids;
mod money;
mod state_machine;

pub use errors::ValidationError;
pub use ids::SessionId;
pub use money::format_thousands;
pub use state_machine::{StateMachine, StateTransitionError};
