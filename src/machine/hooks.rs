//! Extension points and the save lifecycle.
//!
//! Integrators customize side effects through [`TransitionHooks`].
//! Persistence collaborators drive a [`SaveLifecycle`] around each write,
//! calling its four hooks in this order:
//!
//! 1. `before_first_save` (only when the entity has never been written)
//! 2. `before_every_save`
//! 3. the write itself
//! 4. `after_first_save` (only for the first write, only on success)
//! 5. `after_every_save` (only on success)

use crate::core::{Entity, StateField, TransitionTable};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of "now" for history timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The `from`/`to` pair staged for a single save.
///
/// Both sides are `None` for saves that are not driven by a transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingTransition {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl PendingTransition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// A save with no transition attached.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_transition(&self) -> bool {
        self.to.is_some()
    }
}

/// Integrator-defined side effects around a transition.
///
/// Both hooks default to no-ops. They run on every save, so `from` and
/// `to` are `None` when the save was not caused by firing an action.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::Entity;
/// use fieldstate::machine::TransitionHooks;
///
/// struct StampReviewer;
///
/// impl<E: Entity> TransitionHooks<E> for StampReviewer {
///     fn after_transition(&self, entity: &mut E, _from: Option<&str>, to: Option<&str>) {
///         if to == Some("approved") {
///             entity.set_field("reviewed", "yes".to_string());
///         }
///     }
/// }
/// ```
pub trait TransitionHooks<E> {
    fn before_transition(&self, _entity: &mut E, _from: Option<&str>, _to: Option<&str>) {}

    fn after_transition(&self, _entity: &mut E, _from: Option<&str>, _to: Option<&str>) {}
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl<E> TransitionHooks<E> for NoHooks {}

/// Hook points a persistence collaborator must call around a write.
pub trait SaveLifecycle<E> {
    fn before_first_save(&self, entity: &mut E);

    fn before_every_save(&self, entity: &mut E);

    fn after_first_save(&self, entity: &mut E);

    fn after_every_save(&self, entity: &mut E);
}

/// Lifecycle for one save, carrying its pending transition.
pub struct SaveCycle<'m, H> {
    table: &'m TransitionTable,
    hooks: &'m H,
    clock: &'m Clock,
    pending: PendingTransition,
}

impl<'m, H> SaveCycle<'m, H> {
    pub(crate) fn new(
        table: &'m TransitionTable,
        hooks: &'m H,
        clock: &'m Clock,
        pending: PendingTransition,
    ) -> Self {
        Self {
            table,
            hooks,
            clock,
            pending,
        }
    }

    fn stamp_current_state<E: Entity>(&self, entity: &mut E) {
        if !self.table.tracks_history() {
            return;
        }
        let state = StateField::new(self.table).current_state(entity);
        let now = (self.clock)();
        if let Some(history) = entity.state_history_mut() {
            history.record_entry(&state, now);
            tracing::debug!(state = %state, entered_at = %now, "Recorded state entry");
        }
    }
}

impl<E, H> SaveLifecycle<E> for SaveCycle<'_, H>
where
    E: Entity,
    H: TransitionHooks<E>,
{
    fn before_first_save(&self, entity: &mut E) {
        if StateField::new(self.table).ensure_initialized(entity) {
            tracing::debug!(
                state = self.table.initial_state(),
                "Defaulted state field to initial state"
            );
        }
    }

    fn before_every_save(&self, entity: &mut E) {
        self.stamp_current_state(entity);
        self.hooks.before_transition(
            entity,
            self.pending.from.as_deref(),
            self.pending.to.as_deref(),
        );
    }

    fn after_first_save(&self, entity: &mut E) {
        tracing::debug!(
            state = StateField::new(self.table).read(entity),
            "Entity persisted for the first time"
        );
    }

    fn after_every_save(&self, entity: &mut E) {
        self.hooks.after_transition(
            entity,
            self.pending.from.as_deref(),
            self.pending.to.as_deref(),
        );
    }
}
