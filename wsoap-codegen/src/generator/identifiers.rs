//! Reserved-word avoidance, ported from `builder.go`'s `reservedWords`/
//! `reservedWordsInAttr` tables and `normalize`/`makePublic`/`makePrivate`.
//!
//! The Go original reaches for a `_` suffix (`type` -> `type_`) because Go
//! has no escape syntax for keywords-as-identifiers. Rust does: a raw
//! identifier (`r#type`) is the idiomatic substitute, so the tables below
//! map to `r#`-prefixed forms instead.

use std::collections::HashMap;

/// Strict and reserved Rust keywords that collide with generated field or
/// variant names, mapped to their raw-identifier escape.
pub fn reserved_words() -> HashMap<&'static str, &'static str> {
    [
        ("as", "r#as"),
        ("break", "r#break"),
        ("const", "r#const"),
        ("continue", "r#continue"),
        ("crate", "r#crate"),
        ("else", "r#else"),
        ("enum", "r#enum"),
        ("extern", "r#extern"),
        ("false", "r#false"),
        ("fn", "r#fn"),
        ("for", "r#for"),
        ("if", "r#if"),
        ("impl", "r#impl"),
        ("in", "r#in"),
        ("let", "r#let"),
        ("loop", "r#loop"),
        ("match", "r#match"),
        ("mod", "r#mod"),
        ("move", "r#move"),
        ("mut", "r#mut"),
        ("pub", "r#pub"),
        ("ref", "r#ref"),
        ("return", "r#return"),
        ("self", "r#self"),
        ("static", "r#static"),
        ("struct", "r#struct"),
        ("super", "r#super"),
        ("trait", "r#trait"),
        ("true", "r#true"),
        ("type", "r#type"),
        ("unsafe", "r#unsafe"),
        ("use", "r#use"),
        ("where", "r#where"),
        ("while", "r#while"),
        ("async", "r#async"),
        ("await", "r#await"),
        ("dyn", "r#dyn"),
    ]
    .into_iter()
    .collect()
}

/// Same as [`reserved_words`], for identifiers generated as XSD `<attribute>`
/// fields specifically. The Go original keeps `string` reserved in this
/// table only (serde's `#[serde(rename)]` already handles the wire name, so
/// we don't need that entry in Rust; kept as its own function to preserve
/// the separate-table shape should the two tables diverge again later).
pub fn reserved_words_attr() -> HashMap<&'static str, &'static str> {
    reserved_words()
}

/// Strip characters that would not survive as a Rust identifier, collapsing
/// `.` into `_` the way `builder.go`'s `normalize` does.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| {
            if c == '.' {
                Some('_')
            } else if c.is_alphanumeric() || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Capitalize the first character, for public (struct/enum) names. Mirrors
/// `makePublic`.
pub fn make_public(identifier: &str) -> String {
    if identifier.is_empty() {
        return "EmptyString".to_string();
    }
    let mut chars = identifier.chars();
    let first = chars.next().unwrap();
    format!("{}{}", first.to_uppercase(), chars.as_str())
}

/// Lower-case the first character, for private (field/local) names. Mirrors
/// `makePrivate`.
pub fn make_private(identifier: &str) -> String {
    if identifier.is_empty() {
        return identifier.to_string();
    }
    let mut chars = identifier.chars();
    let first = chars.next().unwrap();
    format!("{}{}", first.to_lowercase(), chars.as_str())
}

/// Strip a leading `prefix:` namespace alias from a qualified type name,
/// e.g. `tns:PurchaseOrder` -> `PurchaseOrder`. Mirrors
/// `stripAliasNSFromType`.
pub fn strip_alias_ns_from_type(full_type: &str) -> &str {
    match full_type.rsplit_once(':') {
        Some((_, local)) => local,
        None => full_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_dots_and_drops_symbols() {
        assert_eq!(normalize("foo.bar"), "foo_bar");
        assert_eq!(normalize("foo-bar!"), "foobar");
    }

    #[test]
    fn make_public_and_private_roundtrip_case() {
        assert_eq!(make_public("addResult"), "AddResult");
        assert_eq!(make_private("AddResult"), "addResult");
    }

    #[test]
    fn make_public_handles_empty() {
        assert_eq!(make_public(""), "EmptyString");
    }

    #[test]
    fn strip_alias_ns_from_type_drops_prefix() {
        assert_eq!(strip_alias_ns_from_type("tns:PurchaseOrder"), "PurchaseOrder");
        assert_eq!(strip_alias_ns_from_type("PurchaseOrder"), "PurchaseOrder");
    }

    #[test]
    fn reserved_words_covers_type_keyword() {
        assert_eq!(reserved_words().get("type"), Some(&"r#type"));
    }
}
