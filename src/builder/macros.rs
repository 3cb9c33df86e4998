//! Macros for ergonomic table construction.

/// Declare a transition table inline.
///
/// Settings come first and in this order, each optional: `initial`,
/// `field`, `history`. Every rule starts with `on`. Action and state names
/// are written as identifiers and kept verbatim, so `markPaid` and
/// `mark_paid` both work. Evaluates to `Result<TransitionTable, BuildError>`.
///
/// # Example
///
/// ```
/// use fieldstate::transitions;
///
/// let table = transitions! {
///     initial: "draft",
///     history: true,
///     on submit: [draft, rejected] => submitted,
///     on approve: [submitted] => approved,
///     on reject: [submitted] => rejected,
/// }
/// .unwrap();
///
/// assert_eq!(table.transitions().len(), 3);
/// assert!(table.tracks_history());
/// ```
#[macro_export]
macro_rules! transitions {
    (
        $(initial: $initial:expr,)?
        $(field: $field:expr,)?
        $(history: $history:expr,)?
        $(
            on $action:ident : [$($from:ident),+ $(,)?] => $to:ident
        ),* $(,)?
    ) => {
        $crate::builder::TableBuilder::new()
            $(.initial($initial))?
            $(.state_field($field))?
            $(.track_history($history))?
            $(
                .rule($crate::core::TransitionRule::new(
                    [$(stringify!($from)),+],
                    stringify!($to),
                    stringify!($action),
                ))
            )*
            .build()
    };
}
