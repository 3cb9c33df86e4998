//! Convention-based dispatch of symbolic names.
//!
//! Callers that only know an operation by name (a template, a scripting
//! layer, an RPC method) can hand that name to the machine. Names are
//! classified by a fixed set of conventions:
//!
//! | Name shape                   | Operation                      |
//! |------------------------------|--------------------------------|
//! | `canSubmit`, `can_submit`    | can the action fire now?       |
//! | `isDraft`, `is_draft`        | is the entity in the state?    |
//! | `draftAt`, `draft_at`        | when was the state entered?    |
//! | `submit`                     | fire the action                |
//!
//! The part after the prefix (or before the suffix) is matched against the
//! table verbatim, in `snake_case`, and in `lowerCamelCase`, so tables and
//! callers may use either convention. A query whose stem is unknown
//! answers `false`, unless the whole name is a declared action (so actions
//! such as `is_ready` stay reachable). A bare name that is not an action is
//! handed back as [`Dispatched::Forward`] for the caller's own method
//! resolution.

use crate::core::naming::{candidates, strip_at_suffix, strip_prefix};
use crate::core::Entity;
use crate::machine::error::FsmResult;
use crate::machine::executor::StateMachine;
use crate::machine::hooks::TransitionHooks;
use crate::store::Persistence;
use chrono::{DateTime, Utc};

/// Shape of a dispatched name, before it is resolved against a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call<'a> {
    /// `can<Action>`: guard query.
    Can(&'a str),
    /// `is<State>`: state query.
    Is(&'a str),
    /// `<state>At`: entry timestamp query.
    EnteredAt(&'a str),
    /// Anything else: possibly an action to fire.
    Bare(&'a str),
}

impl<'a> Call<'a> {
    /// Classify a name. Prefixes are checked before the suffix.
    ///
    /// ```rust
    /// use fieldstate::machine::Call;
    ///
    /// assert_eq!(Call::classify("canMarkPaid"), Call::Can("MarkPaid"));
    /// assert_eq!(Call::classify("is_draft"), Call::Is("draft"));
    /// assert_eq!(Call::classify("paidAt"), Call::EnteredAt("paid"));
    /// assert_eq!(Call::classify("cancel"), Call::Bare("cancel"));
    /// ```
    pub fn classify(name: &'a str) -> Self {
        if let Some(stem) = strip_prefix(name, "can") {
            Call::Can(stem)
        } else if let Some(stem) = strip_prefix(name, "is") {
            Call::Is(stem)
        } else if let Some(stem) = strip_at_suffix(name) {
            Call::EnteredAt(stem)
        } else {
            Call::Bare(name)
        }
    }
}

/// Result of dispatching a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// Answer to a `can…` query.
    Allowed(bool),
    /// Answer to an `is…` query.
    InState(bool),
    /// Answer to a `…At` query.
    EnteredAt(Option<DateTime<Utc>>),
    /// An action was fired; carries the save result.
    Fired(bool),
    /// The name is not the machine's to answer.
    Forward,
}

impl<H> StateMachine<H> {
    fn known_actions_for(&self, stem: &str) -> Vec<String> {
        candidates(stem)
            .into_iter()
            .filter(|name| self.table().is_known_action(name))
            .collect()
    }

    fn known_states_for(&self, stem: &str) -> Vec<String> {
        candidates(stem)
            .into_iter()
            .filter(|name| self.table().is_known_state(name))
            .collect()
    }

    /// Resolve `name` by convention and perform the matching operation.
    ///
    /// Queries never modify the entity. A query whose stem names no known
    /// action or state answers `false` (or `None` for timestamps), unless
    /// the whole name is itself a declared action, in which case that
    /// action fires. A bare action name fires the action, failing with
    /// [`FsmError::InvalidTransition`] when it is not legal from the
    /// current state. Anything else is forwarded.
    ///
    /// [`FsmError::InvalidTransition`]: crate::machine::FsmError::InvalidTransition
    pub fn dispatch<E, P>(&self, entity: &mut E, store: &mut P, name: &str) -> FsmResult<Dispatched>
    where
        E: Entity,
        H: TransitionHooks<E>,
        P: Persistence<E> + ?Sized,
    {
        match Call::classify(name) {
            Call::Can(stem) => {
                let actions = self.known_actions_for(stem);
                if actions.is_empty() {
                    return self.fire_named(entity, store, name, Dispatched::Allowed(false));
                }
                Ok(Dispatched::Allowed(actions.iter().any(|a| self.can_fire(entity, a))))
            }
            Call::Is(stem) => {
                let states = self.known_states_for(stem);
                if states.is_empty() {
                    return self.fire_named(entity, store, name, Dispatched::InState(false));
                }
                Ok(Dispatched::InState(states.iter().any(|s| self.is_in_state(entity, s))))
            }
            Call::EnteredAt(stem) => {
                let states = self.known_states_for(stem);
                if states.is_empty() {
                    return self.fire_named(entity, store, name, Dispatched::EnteredAt(None));
                }
                Ok(Dispatched::EnteredAt(states.iter().find_map(|s| self.entered_at(entity, s))))
            }
            Call::Bare(action) => self.fire_named(entity, store, action, Dispatched::Forward),
        }
    }

    /// Fire `name` if it spells a declared action, otherwise answer
    /// `unresolved`.
    ///
    /// A legal spelling is preferred. When no spelling is legal the first
    /// known one is fired so the caller gets the invalid transition error.
    fn fire_named<E, P>(
        &self,
        entity: &mut E,
        store: &mut P,
        name: &str,
        unresolved: Dispatched,
    ) -> FsmResult<Dispatched>
    where
        E: Entity,
        H: TransitionHooks<E>,
        P: Persistence<E> + ?Sized,
    {
        let actions = self.known_actions_for(name);
        let chosen = actions
            .iter()
            .find(|a| self.can_fire(entity, a))
            .or_else(|| actions.first());

        match chosen {
            Some(action) => self.fire(entity, store, action).map(Dispatched::Fired),
            None => {
                tracing::trace!(
                    name = %name,
                    answer = ?unresolved,
                    "Name matched no known action or state"
                );
                Ok(unresolved)
            }
        }
    }
}
