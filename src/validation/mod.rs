//! Validation of transition tables using Stillwater's `Validation`.
//!
//! A table with several mistakes reports every one of them in a single
//! pass instead of stopping at the first, so an integrator can fix a
//! whole configuration at once.
//!
//! # Example
//!
//! ```rust
//! use fieldstate::core::TransitionRule;
//! use fieldstate::validation::{validate_table, TableViolation};
//! use stillwater::validation::Validation;
//!
//! let rules = vec![
//!     TransitionRule::new(Vec::<String>::new(), "submitted", "submit"),
//!     TransitionRule::new(["draft"], "", ""),
//! ];
//!
//! match validate_table("draft", "state", &rules) {
//!     Validation::Failure(errors) => assert_eq!(errors.len(), 3),
//!     Validation::Success(_) => panic!("expected violations"),
//! }
//! ```

pub mod violations;

pub use violations::TableViolation;

use crate::core::TransitionRule;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of validating a table or a rule.
pub type TableValidation = Validation<(), NonEmptyVec<TableViolation>>;

fn check(ok: bool, violation: impl FnOnce() -> TableViolation) -> TableValidation {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Validate the shape of one rule at position `index`.
pub fn validate_rule(index: usize, rule: &TransitionRule) -> TableValidation {
    let checks = vec![
        check(!rule.from_states().is_empty(), || TableViolation::EmptyFrom {
            index,
        }),
        check(
            rule.from_states().iter().all(|s| !s.is_empty()),
            || TableViolation::BlankFromState { index },
        ),
        check(!rule.to().is_empty(), || TableViolation::EmptyTo { index }),
        check(!rule.action().is_empty(), || TableViolation::EmptyAction {
            index,
        }),
    ];
    Validation::all_vec(checks).map(|_| ())
}

/// Validate a whole table: table-level settings, every rule, and pairwise
/// conflicts between rules that share an action and a source state.
pub fn validate_table(
    initial_state: &str,
    state_field: &str,
    rules: &[TransitionRule],
) -> TableValidation {
    let mut checks = vec![
        check(!initial_state.is_empty(), || TableViolation::EmptyInitialState),
        check(!state_field.is_empty(), || TableViolation::EmptyStateField),
    ];

    checks.extend(
        rules
            .iter()
            .enumerate()
            .map(|(index, rule)| validate_rule(index, rule)),
    );

    for (first, a) in rules.iter().enumerate() {
        for (offset, b) in rules[first + 1..].iter().enumerate() {
            let conflicting = a.action() == b.action() && a.to() != b.to() && a.overlaps(b);
            checks.push(check(!conflicting, || TableViolation::ConflictingRules {
                action: a.action().to_string(),
                first,
                second: first + 1 + offset,
                first_to: a.to().to_string(),
                second_to: b.to().to_string(),
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
