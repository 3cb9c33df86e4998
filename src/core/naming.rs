//! Name normalization for convention-based lookups.
//!
//! Tables may declare actions and states in either `camelCase` or
//! `snake_case`, and callers may spell them either way. Every lookup
//! therefore tries a small, ordered set of spellings.

/// Convert a name to `snake_case`.
///
/// An underscore is inserted before every uppercase letter that is not
/// the first character and does not already follow an underscore.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::naming::snake_case;
///
/// assert_eq!(snake_case("MarkPaid"), "mark_paid");
/// assert_eq!(snake_case("markPaid"), "mark_paid");
/// assert_eq!(snake_case("mark_paid"), "mark_paid");
/// ```
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase() {
            if matches!(prev, Some(p) if p != '_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Convert a name to `lowerCamelCase`.
///
/// # Example
///
/// ```rust
/// use fieldstate::core::naming::lower_camel_case;
///
/// assert_eq!(lower_camel_case("mark_paid"), "markPaid");
/// assert_eq!(lower_camel_case("MarkPaid"), "markPaid");
/// ```
pub fn lower_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

/// Spellings to try for a name, in priority order: verbatim, snake case,
/// lower camel case. Duplicates are removed.
pub fn candidates(name: &str) -> Vec<String> {
    let mut forms = vec![name.to_string()];
    for form in [snake_case(name), lower_camel_case(name)] {
        if !form.is_empty() && !forms.contains(&form) {
            forms.push(form);
        }
    }
    forms
}

/// Strip a query prefix such as `can` or `is`.
///
/// Accepts `canSubmit` (prefix followed by an uppercase letter) and
/// `can_submit` (prefix followed by an underscore). Returns `None` for
/// names like `cancel` where the prefix is just part of a word.
pub fn strip_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    if let Some(snake) = rest.strip_prefix('_') {
        return (!snake.is_empty()).then_some(snake);
    }
    rest.chars()
        .next()
        .filter(|c| c.is_uppercase())
        .map(|_| rest)
}

/// Strip the timestamp query suffix: `submittedAt` or `submitted_at`.
pub fn strip_at_suffix(name: &str) -> Option<&str> {
    let stem = name
        .strip_suffix("_at")
        .or_else(|| name.strip_suffix("At"))?;
    (!stem.is_empty() && stem.chars().all(|c| c.is_alphanumeric() || c == '_')).then_some(stem)
}
