//! The engine: firing transitions, dispatching names, and the save
//! lifecycle shared with persistence collaborators.
//!
//! # Key Concepts
//!
//! - **State Machine**: applies a table to entities and persists the result
//! - **Dispatch**: resolves symbolic names (`canSubmit`, `isDraft`,
//!   `draftAt`, `submit`) to the operation they stand for
//! - **Hooks**: integrator side effects and the lifecycle a collaborator
//!   runs around each write
//!
//! Everything here is synchronous. The engine assumes one holder mutates a
//! given entity at a time; guarding the stored record against concurrent
//! writers is the collaborator's job.

mod dispatch;
mod error;
mod executor;
mod hooks;

pub use dispatch::{Call, Dispatched};
pub use error::{FsmError, FsmResult};
pub use executor::StateMachine;
pub use hooks::{Clock, NoHooks, PendingTransition, SaveCycle, SaveLifecycle, TransitionHooks};
