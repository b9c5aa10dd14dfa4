#![forbid(unsafe_code)]

//! Rule-name normalization
//!
//! Strips the leading `^` bail marker and converts snake_case rule names to
//! the camelCase keys the registry is indexed by.

use crate::types::Modifier;

/// Split a raw rule name into its normalized name and modifier
///
/// `"^not_in"` becomes `("notIn", Modifier::BailPrefix)`. Never fails.
pub fn resolve_modifier(raw_name: &str) -> (String, Modifier) {
    match raw_name.strip_prefix(Modifier::BAIL_MARKER) {
        Some(rest) => (camelize(rest), Modifier::BailPrefix),
        None => (camelize(raw_name), Modifier::None),
    }
}

/// Snake-to-camel conversion
///
/// Every underscore followed by a letter or digit is removed and that
/// character uppercased, unless the underscore starts the string or follows
/// another underscore. Those runs are left as they are.
pub fn camelize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let convertible = c == '_'
            && i > 0
            && chars[i - 1] != '_'
            && chars.get(i + 1).is_some_and(|next| next.is_alphanumeric());

        if convertible {
            out.extend(chars[i + 1].to_uppercase());
            i += 2;
        } else {
            out.push(c);
            i += 1;
        }
    }

    out
}
