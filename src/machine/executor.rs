//! State machine that applies transitions to entities.

use crate::core::{Entity, Guard, StateField, TransitionTable};
use crate::machine::error::{FsmError, FsmResult};
use crate::machine::hooks::{Clock, NoHooks, PendingTransition, SaveCycle, TransitionHooks};
use crate::store::Persistence;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Engine for one entity type: a table, the integrator's hooks, and a
/// clock.
///
/// The machine holds no per-entity data. Every operation takes the entity
/// it works on, so one machine serves all entities of its type.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::{TransitionRule, TransitionTable};
/// use fieldstate::machine::StateMachine;
/// use fieldstate::store::{MemoryStore, Record};
///
/// let table = TransitionTable::new(
///     "draft",
///     vec![TransitionRule::new(["draft"], "submitted", "submit")],
/// )
/// .unwrap();
/// let machine = StateMachine::new(table);
/// let mut store = MemoryStore::new();
/// let mut doc = Record::new();
///
/// assert!(machine.can_fire(&doc, "submit"));
/// assert_eq!(machine.fire(&mut doc, &mut store, "submit"), Ok(true));
/// assert!(machine.is_in_state(&doc, "submitted"));
/// ```
pub struct StateMachine<H = NoHooks> {
    table: TransitionTable,
    hooks: H,
    clock: Clock,
}

impl StateMachine<NoHooks> {
    /// Create a machine with no-op hooks and the system clock.
    pub fn new(table: TransitionTable) -> Self {
        Self {
            table,
            hooks: NoHooks,
            clock: Arc::new(Utc::now),
        }
    }
}

impl<H> StateMachine<H> {
    /// Replace the transition hooks.
    pub fn with_hooks<H2>(self, hooks: H2) -> StateMachine<H2> {
        StateMachine {
            table: self.table,
            hooks,
            clock: self.clock,
        }
    }

    /// Replace the clock used for history timestamps.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Current reading of the machine's clock.
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn guard(&self) -> Guard<'_> {
        Guard::new(&self.table)
    }

    pub fn state_field(&self) -> StateField<'_> {
        StateField::new(&self.table)
    }

    /// Current state, writing the initial state into the field if unset.
    pub fn current_state<E: Entity>(&self, entity: &mut E) -> String {
        self.state_field().current_state(entity)
    }

    pub fn can_fire<E: Entity>(&self, entity: &E, action: &str) -> bool {
        self.guard().can_fire(entity, action)
    }

    pub fn is_in_state<E: Entity>(&self, entity: &E, state: &str) -> bool {
        self.guard().is_in_state(entity, state)
    }

    /// Actions legal from the entity's current state.
    pub fn available_actions<E: Entity>(&self, entity: &E) -> Vec<&str> {
        self.guard().available_actions(entity)
    }

    /// When the entity most recently entered `state`.
    ///
    /// Always `None` when history tracking is disabled or the entity has no
    /// history column.
    pub fn entered_at<E: Entity>(&self, entity: &E, state: &str) -> Option<DateTime<Utc>> {
        if !self.table.tracks_history() {
            return None;
        }
        entity.state_history()?.entry_timestamp_of(state)
    }

    /// Fire `action` and persist the result.
    ///
    /// Fails with [`FsmError::InvalidTransition`] (or
    /// [`FsmError::UnknownAction`] for names no rule declares) without
    /// touching the entity. Otherwise the state field is set to the rule's
    /// target and the entity is saved; the returned flag is the
    /// collaborator's save result.
    ///
    /// A failed save does not roll the state field back. The in-memory
    /// entity then holds a state that was never stored, and the caller is
    /// responsible for reconciling it.
    pub fn fire<E, P>(&self, entity: &mut E, store: &mut P, action: &str) -> FsmResult<bool>
    where
        E: Entity,
        H: TransitionHooks<E>,
        P: Persistence<E> + ?Sized,
    {
        let field = self.state_field();
        let from = field.read(entity).to_string();

        let Some(rule) = self.table.rule_for(action, &from) else {
            if !self.table.is_known_action(action) {
                return Err(FsmError::UnknownAction(action.to_string()));
            }
            tracing::warn!(from = %from, action = %action, "Rejected invalid transition");
            return Err(FsmError::InvalidTransition {
                from,
                action: action.to_string(),
            });
        };

        let to = rule.to();
        field.set_state(entity, to);
        tracing::debug!(from = %from, to = %to, action = %action, "Applying transition");

        let saved = self.persist(entity, store, PendingTransition::new(from, to));
        if !saved {
            tracing::warn!(
                action = %action,
                state = %to,
                "Transition applied in memory but the save failed"
            );
        }
        Ok(saved)
    }

    /// Save the entity without a transition.
    ///
    /// The lifecycle still runs, so the state field is defaulted on the
    /// first save and the current state's history entry is refreshed.
    pub fn save<E, P>(&self, entity: &mut E, store: &mut P) -> bool
    where
        E: Entity,
        H: TransitionHooks<E>,
        P: Persistence<E> + ?Sized,
    {
        self.persist(entity, store, PendingTransition::none())
    }

    fn persist<E, P>(&self, entity: &mut E, store: &mut P, pending: PendingTransition) -> bool
    where
        E: Entity,
        H: TransitionHooks<E>,
        P: Persistence<E> + ?Sized,
    {
        let cycle = SaveCycle::new(&self.table, &self.hooks, &self.clock, pending);
        store.save(entity, &cycle)
    }
}
