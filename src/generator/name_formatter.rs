//! Identifier casing, quoting and table-name singularization

use crate::generator::options::GeneratorOptions;
use std::borrow::Cow;
use std::cmp::Ordering;

fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

/// Convert a snake, kebab or space separated identifier to upper camel case.
///
/// Separators are removed and the character after each one is uppercased,
/// as is the first character. All other characters are kept as they are.
pub fn to_title_word(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut upper_next = true;

    for c in value.chars() {
        if is_separator(c) {
            upper_next = true;
            continue;
        }
        if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Single-quote a property name that is not a bare identifier
pub fn quote_if_needed(name: &str) -> Cow<'_, str> {
    if name.chars().any(|c| c == '-' || c.is_whitespace()) {
        Cow::Owned(format!("'{}'", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Render a value as a single-quoted string literal
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            literal.push('\\');
        }
        literal.push(c);
    }
    literal.push('\'');
    literal
}

/// Key used for an enum member
pub fn format_enum_member<'a>(options: &GeneratorOptions, name: &'a str) -> Cow<'a, str> {
    if options.pascal_enums {
        Cow::Owned(to_title_word(name))
    } else {
        quote_if_needed(name)
    }
}

/// Three-way comparison of the lowercased operands
pub fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort items by a name key without touching the caller's sequence.
///
/// Names equal under [`compare_case_insensitive`] fall back to a raw
/// comparison so the result never depends on input order.
pub fn sorted_by_name<'a, T, F>(items: impl IntoIterator<Item = &'a T>, name: F) -> Vec<&'a T>
where
    T: ?Sized + 'a,
    F: Fn(&T) -> &str,
{
    let mut sorted: Vec<&T> = items.into_iter().collect();
    sorted.sort_by(|a, b| {
        let (a, b) = (name(*a), name(*b));
        compare_case_insensitive(a, b).then_with(|| a.cmp(b))
    });
    sorted
}

/// Derive a declaration name from a table name.
///
/// This is a string heuristic, not linguistic singularization. After title
/// casing, the first matching rule applies:
/// `ies` becomes `y`, `sses` loses `es`, `ess` is kept, a trailing `s` is dropped.
/// Irregular plurals such as `children` pass through untouched.
pub fn singularize_type_name(table_name: &str) -> String {
    let mut name = to_title_word(table_name);

    if let Some(stem) = name.strip_suffix("ies") {
        name = format!("{}y", stem);
    } else if name.ends_with("sses") {
        name.truncate(name.len() - 2);
    } else if name.ends_with("ess") {
        // address, business
    } else if name.ends_with('s') {
        name.pop();
    }

    name
}
