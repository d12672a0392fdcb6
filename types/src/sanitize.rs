//! HTML escaping for untrusted form input.
//!
//! Every value a visitor types into the contact form ends up inside the HTML
//! body of an outgoing email. Mail clients render that body, so raw markup in
//! a field would be interpreted.
//!
//! # Escaped characters
//!
//! | Input | Output |
//! |-------|--------|
//! | `&` | `&amp;` |
//! | `<` | `&lt;` |
//! | `>` | `&gt;` |
//! | `"` | `&quot;` |
//! | `'` | `&#x27;` |
//!
//! All escaped values are safe in element content and in quoted attributes.

use std::borrow::Cow;

/// Escape text for inclusion in HTML element content or quoted attributes.
///
/// Returns `Cow::Borrowed` when nothing needs escaping (the common case for
/// names and phone numbers), avoiding allocation.
///
/// # Examples
///
/// ```
/// use formflow_types::escape_html;
///
/// assert_eq!(escape_html("Ola Nordmann"), "Ola Nordmann");
/// assert_eq!(escape_html("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.chars().any(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + input.len() / 4);
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }

    Cow::Owned(result)
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'')
}
