//! Guard queries: can an action fire now, and is the entity in a state?
//!
//! Guards are pure reads. They never initialize or modify the entity.

use super::state::{Entity, StateField};
use super::table::TransitionTable;

/// Answers read-only questions about an entity against a table.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::{Entity, Guard, TransitionRule, TransitionTable};
///
/// struct Doc(String);
///
/// impl Entity for Doc {
///     fn field(&self, _: &str) -> Option<&str> {
///         Some(self.0.as_str())
///     }
///     fn set_field(&mut self, _: &str, value: String) {
///         self.0 = value;
///     }
/// }
///
/// let table = TransitionTable::new(
///     "draft",
///     vec![TransitionRule::new(["draft"], "submitted", "submit")],
/// )
/// .unwrap();
/// let guard = Guard::new(&table);
///
/// assert!(guard.can_fire(&Doc("draft".into()), "submit"));
/// assert!(!guard.can_fire(&Doc("submitted".into()), "submit"));
/// assert!(guard.is_in_state(&Doc(String::new()), "draft"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Guard<'t> {
    table: &'t TransitionTable,
}

impl<'t> Guard<'t> {
    pub fn new(table: &'t TransitionTable) -> Self {
        Self { table }
    }

    /// Whether `action` is legal from the entity's current state.
    ///
    /// Every rule named `action` is considered; any one listing the current
    /// state as a source is enough.
    pub fn can_fire<E: Entity>(&self, entity: &E, action: &str) -> bool {
        let current = StateField::new(self.table).read(entity);
        self.table
            .transitions()
            .iter()
            .any(|rule| rule.action() == action && rule.applies_from(current))
    }

    /// Exact comparison against the current state. No name normalization.
    pub fn is_in_state<E: Entity>(&self, entity: &E, state: &str) -> bool {
        StateField::new(self.table).read(entity) == state
    }

    /// Actions legal from the current state, in declaration order.
    pub fn available_actions<E: Entity>(&self, entity: &E) -> Vec<&'t str> {
        let current = StateField::new(self.table).read(entity);
        let mut actions: Vec<&'t str> = Vec::new();
        for rule in self.table.transitions() {
            if rule.applies_from(current) && !actions.contains(&rule.action()) {
                actions.push(rule.action());
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionRule;

    struct Doc {
        state: Option<String>,
    }

    impl Doc {
        fn in_state(state: &str) -> Self {
            Self {
                state: Some(state.to_string()),
            }
        }
    }

    impl Entity for Doc {
        fn field(&self, name: &str) -> Option<&str> {
            match name {
                "state" => self.state.as_deref(),
                _ => None,
            }
        }

        fn set_field(&mut self, _name: &str, value: String) {
            self.state = Some(value);
        }
    }

    fn table() -> TransitionTable {
        TransitionTable::new(
            "draft",
            vec![
                TransitionRule::new(["draft"], "submitted", "submit"),
                TransitionRule::new(["submitted"], "approved", "approve"),
                TransitionRule::new(["submitted"], "draft", "withdraw"),
                TransitionRule::new(["approved"], "draft", "withdraw"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn can_fire_checks_source_state() {
        let table = table();
        let guard = Guard::new(&table);

        assert!(guard.can_fire(&Doc::in_state("draft"), "submit"));
        assert!(!guard.can_fire(&Doc::in_state("draft"), "approve"));
        assert!(guard.can_fire(&Doc::in_state("submitted"), "approve"));
    }

    #[test]
    fn rules_sharing_an_action_are_ored() {
        let table = table();
        let guard = Guard::new(&table);

        assert!(guard.can_fire(&Doc::in_state("submitted"), "withdraw"));
        assert!(guard.can_fire(&Doc::in_state("approved"), "withdraw"));
        assert!(!guard.can_fire(&Doc::in_state("draft"), "withdraw"));
    }

    #[test]
    fn unknown_action_cannot_fire() {
        let table = table();
        let guard = Guard::new(&table);

        assert!(!guard.can_fire(&Doc::in_state("draft"), "publish"));
    }

    #[test]
    fn unset_state_reads_as_initial() {
        let table = table();
        let guard = Guard::new(&table);
        let doc = Doc { state: None };

        assert!(guard.is_in_state(&doc, "draft"));
        assert!(guard.can_fire(&doc, "submit"));
        assert!(doc.state.is_none());
    }

    #[test]
    fn is_in_state_is_exact() {
        let table = table();
        let guard = Guard::new(&table);
        let doc = Doc::in_state("submitted");

        assert!(guard.is_in_state(&doc, "submitted"));
        assert!(!guard.is_in_state(&doc, "Submitted"));
        assert!(!guard.is_in_state(&doc, "draft"));
    }

    #[test]
    fn available_actions_follow_declaration_order() {
        let table = table();
        let guard = Guard::new(&table);

        assert_eq!(
            guard.available_actions(&Doc::in_state("submitted")),
            vec!["approve", "withdraw"]
        );
        assert!(guard
            .available_actions(&Doc::in_state("archived"))
            .is_empty());
    }
}
