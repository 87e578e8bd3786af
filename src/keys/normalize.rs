//! Canonical spelling for individual key names.
//!
//! Every raw key name a user can type (`cmd`, `⌘`, `Control`, `esc`, `f5`, ...)
//! maps to exactly one canonical token. Matching is case-insensitive and never
//! fails: unknown names fall back to a title-cased form.

use regex::Regex;
use std::sync::LazyLock;

/// Canonical modifier tokens, in the order a captured chord lists them.
pub const MODIFIER_ORDER: [&str; 4] = ["Ctrl", "Cmd", "Alt", "Shift"];

/// Modifier aliases (lower-cased input -> canonical token).
const MODIFIER_ALIASES: &[(&str, &str)] = &[
    ("cmd", "Cmd"),
    ("command", "Cmd"),
    ("⌘", "Cmd"),
    ("ctrl", "Ctrl"),
    ("control", "Ctrl"),
    ("^", "Ctrl"),
    ("alt", "Alt"),
    ("option", "Alt"),
    ("opt", "Alt"),
    ("⌥", "Alt"),
    ("shift", "Shift"),
    ("⇧", "Shift"),
];

/// Named key aliases (lower-cased input -> canonical token).
const NAMED_KEY_ALIASES: &[(&str, &str)] = &[
    ("esc", "Esc"),
    ("escape", "Esc"),
    ("enter", "Enter"),
    ("return", "Enter"),
    ("↵", "Enter"),
    ("space", "Space"),
    ("tab", "Tab"),
    ("⇥", "Tab"),
    ("backspace", "Backspace"),
    ("delete", "Backspace"),
    ("⌫", "Backspace"),
    ("up", "Up"),
    ("↑", "Up"),
    ("down", "Down"),
    ("↓", "Down"),
    ("left", "Left"),
    ("←", "Left"),
    ("right", "Right"),
    ("→", "Right"),
];

static FUNCTION_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^f\d+$").expect("function key pattern is valid"));

fn lookup(table: &[(&str, &'static str)], lower: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, canonical)| *canonical)
}

/// Normalizes a raw key name to its canonical token.
///
/// # Examples
///
/// ```
/// use keyforge::keys::normalize_key_name;
///
/// assert_eq!(normalize_key_name("command"), "Cmd");
/// assert_eq!(normalize_key_name("f12"), "F12");
/// assert_eq!(normalize_key_name("s"), "S");
/// assert_eq!(normalize_key_name("PAGEUP"), "Pageup");
/// ```
#[must_use]
pub fn normalize_key_name(raw: &str) -> String {
    let key = raw.trim();
    let lower = key.to_lowercase();

    if let Some(canonical) = lookup(MODIFIER_ALIASES, &lower) {
        return canonical.to_string();
    }
    if let Some(canonical) = lookup(NAMED_KEY_ALIASES, &lower) {
        return canonical.to_string();
    }

    if FUNCTION_KEY.is_match(&lower) {
        return key.to_uppercase();
    }

    if key.chars().count() == 1 {
        return key.to_uppercase();
    }

    title_case(&lower)
}

/// Returns true if `token` is one of the canonical modifier tokens.
#[must_use]
pub fn is_modifier(token: &str) -> bool {
    MODIFIER_ORDER.contains(&token)
}

fn title_case(lower: &str) -> String {
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
