//! Access to the entity field holding the current state.
//!
//! The engine never owns an entity. It reads and writes the state field
//! (and, optionally, the history map) through the [`Entity`] trait, so any
//! record type can carry a state machine.

use super::history::StateHistory;
use super::table::TransitionTable;

/// Contract a record must satisfy to carry a state machine.
///
/// Fields are addressed by name so the engine stays agnostic of the
/// record's layout; the table decides which field holds the state.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::{Entity, StateHistory};
///
/// #[derive(Default)]
/// struct Invoice {
///     status: String,
///     history: StateHistory,
/// }
///
/// impl Entity for Invoice {
///     fn field(&self, name: &str) -> Option<&str> {
///         (name == "status").then_some(self.status.as_str())
///     }
///
///     fn set_field(&mut self, name: &str, value: String) {
///         if name == "status" {
///             self.status = value;
///         }
///     }
///
///     fn state_history(&self) -> Option<&StateHistory> {
///         Some(&self.history)
///     }
///
///     fn state_history_mut(&mut self) -> Option<&mut StateHistory> {
///         Some(&mut self.history)
///     }
/// }
/// ```
pub trait Entity {
    /// Read a field by name. `None` when the entity has no such field.
    fn field(&self, name: &str) -> Option<&str>;

    /// Write a field by name.
    fn set_field(&mut self, name: &str, value: String);

    /// The state history map, if this entity stores one.
    fn state_history(&self) -> Option<&StateHistory> {
        None
    }

    /// Mutable access to the state history map, if this entity stores one.
    fn state_history_mut(&mut self) -> Option<&mut StateHistory> {
        None
    }
}

/// Reads and writes an entity's current state according to a table.
///
/// An empty or missing state field is treated as the table's initial
/// state. Mutating reads ([`StateField::current_state`]) also write that
/// default back, so the field is never left empty once touched.
#[derive(Clone, Copy, Debug)]
pub struct StateField<'t> {
    table: &'t TransitionTable,
}

impl<'t> StateField<'t> {
    pub fn new(table: &'t TransitionTable) -> Self {
        Self { table }
    }

    /// Name of the entity field holding the state.
    pub fn name(&self) -> &'t str {
        self.table.state_field_name()
    }

    /// Current state without writing the default back.
    pub fn read<'e, E: Entity>(&self, entity: &'e E) -> &'e str
    where
        't: 'e,
    {
        match entity.field(self.name()) {
            Some(state) if !state.is_empty() => state,
            _ => self.table.initial_state(),
        }
    }

    /// Write the initial state into the field if it is empty.
    ///
    /// Returns `true` when the field was defaulted.
    pub fn ensure_initialized<E: Entity>(&self, entity: &mut E) -> bool {
        let empty = entity.field(self.name()).is_none_or(str::is_empty);
        if empty {
            entity.set_field(self.name(), self.table.initial_state().to_string());
        }
        empty
    }

    /// Current state, lazily initializing the field first.
    pub fn current_state<E: Entity>(&self, entity: &mut E) -> String {
        self.ensure_initialized(entity);
        self.read(entity).to_string()
    }

    pub(crate) fn set_state<E: Entity>(&self, entity: &mut E, state: &str) {
        entity.set_field(self.name(), state.to_string());
    }

    pub fn is_known_state(&self, name: &str) -> bool {
        self.table.is_known_state(name)
    }

    pub fn is_known_action(&self, name: &str) -> bool {
        self.table.is_known_action(name)
    }
}
