//! Core state machine types and logic.
//!
//! This module contains the side-effect-free pieces of the engine:
//! - Transition rules and the table that orders them
//! - The state field accessor and the `Entity` contract
//! - Guard queries
//! - Per-state entry history
//! - Name normalization used by dynamic dispatch

mod guard;
mod history;
pub mod naming;
mod rule;
mod state;
mod table;

pub use guard::Guard;
pub use history::StateHistory;
pub use rule::TransitionRule;
pub use state::{Entity, StateField};
pub use table::{ConfigError, TransitionTable, DEFAULT_INITIAL_STATE, DEFAULT_STATE_FIELD};
