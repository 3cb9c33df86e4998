//! Errors raised by the engine.

use thiserror::Error;

/// Errors that can occur when firing or dispatching actions.
///
/// A failed write by the persistence collaborator is not an error here;
/// it is reported as `Ok(false)` from [`StateMachine::fire`].
///
/// [`StateMachine::fire`]: crate::machine::StateMachine::fire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("Invalid state transition from '{from}' on '{action}'")]
    InvalidTransition { from: String, action: String },

    #[error("No transition is declared for action '{0}'")]
    UnknownAction(String),
}

/// Result type alias for engine operations
pub type FsmResult<T> = Result<T, FsmError>;
