//! Fieldstate: a field-agnostic finite state machine for persistable records
//!
//! Fieldstate attaches a state machine to any record that has a field for
//! its current state. A [`TransitionTable`] declares which actions move the
//! record between which states; the [`StateMachine`] answers guard queries,
//! fires actions, stamps per-state entry times, and hands the record to a
//! persistence collaborator to be written.
//!
//! # Core Concepts
//!
//! - **Table**: ordered, validated transition rules plus settings
//! - **Entity**: any record exposing its fields by name
//! - **Guards**: pure queries such as "can `submit` fire now?"
//! - **History**: optional map from state to last entry time
//! - **Dispatch**: resolving names like `canSubmit` or `draftAt` by convention
//! - **Persistence**: an external collaborator that runs the save lifecycle
//!
//! # Example
//!
//! ```rust
//! use fieldstate::machine::{Dispatched, FsmError, StateMachine};
//! use fieldstate::store::{MemoryStore, Record};
//! use fieldstate::transitions;
//!
//! let table = transitions! {
//!     initial: "draft",
//!     on submit: [draft] => submitted,
//!     on approve: [submitted] => approved,
//! }
//! .unwrap();
//!
//! let machine = StateMachine::new(table);
//! let mut store = MemoryStore::new();
//! let mut report = Record::new();
//!
//! assert_eq!(
//!     machine.dispatch(&mut report, &mut store, "canSubmit"),
//!     Ok(Dispatched::Allowed(true))
//! );
//! assert_eq!(machine.fire(&mut report, &mut store, "submit"), Ok(true));
//! assert!(machine.is_in_state(&report, "submitted"));
//! assert!(matches!(
//!     machine.fire(&mut report, &mut store, "submit"),
//!     Err(FsmError::InvalidTransition { .. })
//! ));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{Entity, Guard, StateHistory, TransitionRule, TransitionTable};
pub use machine::{Dispatched, FsmError, StateMachine, TransitionHooks};
pub use store::{MemoryStore, Persistence, Record};
