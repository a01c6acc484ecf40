//! Casing and naming rules for generated paths and symbols.
//!
//! Definition keys arrive in whatever casing the author chose (`createIssue`,
//! `create_issue`, `CreateIssue`). Generated paths and symbols are derived from them
//! with the functions below, so two keys that differ only by casing map to the same
//! path and symbol.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `createIssue` | [`to_pascal_case`] | `CreateIssue` |
//! | `create_issue` | [`to_camel_case`] | `createIssue` |
//! | `createIssue` | [`to_kebab_case`] | `create-issue` |
//! | `Input` | [`lower_first`] | `input` |

/// Characters treated as word separators.
const SEPARATORS: [char; 4] = ['-', '_', ' ', '.'];

/// Convert a string to PascalCase.
///
/// Handles camelCase, snake_case, kebab-case, and already-capitalized input.
///
/// # Examples
///
/// ```
/// use schemagen_core::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("createIssue"), "CreateIssue");
/// assert_eq!(to_pascal_case("create-issue"), "CreateIssue");
/// assert_eq!(to_pascal_case("create_issue"), "CreateIssue");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(SEPARATORS).map(capitalize).collect()
}

/// Convert a string to camelCase.
///
/// # Examples
///
/// ```
/// use schemagen_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("create_issue"), "createIssue");
/// assert_eq!(to_camel_case("create-issue"), "createIssue");
/// ```
pub fn to_camel_case(s: &str) -> String {
    lower_first(&to_pascal_case(s))
}

/// Convert a string to kebab-case, the path-safe casing.
///
/// Word boundaries are separators, lower-to-upper transitions, and the last capital
/// of an acronym that is followed by a lowercase letter.
///
/// # Examples
///
/// ```
/// use schemagen_core::naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("createIssue"), "create-issue");
/// assert_eq!(to_kebab_case("CreateIssue"), "create-issue");
/// assert_eq!(to_kebab_case("HTTPRequest"), "http-request");
/// ```
pub fn to_kebab_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if SEPARATORS.contains(&c) {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    while out.ends_with('-') {
        out.pop();
    }

    out
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use schemagen_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Check whether a name is in SCREAMING_SNAKE_CASE.
///
/// # Examples
///
/// ```
/// use schemagen_core::naming::is_screaming_snake_case;
///
/// assert!(is_screaming_snake_case("API_KEY"));
/// assert!(!is_screaming_snake_case("apiKey"));
/// ```
pub fn is_screaming_snake_case(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_uppercase())
        && s.split('_').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        })
}

/// Check whether a name can be used as a bare identifier in generated TypeScript.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Check whether a definition item key is acceptable.
///
/// Keys start with an ASCII letter and contain only ASCII letters, digits, `_`, and `-`.
pub fn is_valid_item_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}
