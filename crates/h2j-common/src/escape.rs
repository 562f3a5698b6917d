//! HTML escaping primitive.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! "Escaping a string ... consists of running the following steps:
//!  1. Replace any occurrence of the "&" character by the string "&amp;".
//!  2. Replace any occurrences of the U+00A0 NO-BREAK SPACE character by the string "&nbsp;".
//!  3. If the algorithm was invoked in the attribute mode, replace any occurrences
//!     of the """ character by the string "&quot;".
//!  4. If the algorithm was not invoked in the attribute mode, replace any occurrences
//!     of the "<" character by the string "&lt;", and any occurrences of the ">"
//!     character by the string "&gt;"."
//!
//! We use a single mode that is safe in both positions, so the non-breaking space
//! rule is skipped and quotes are always escaped.

/// Escape `&`, `<`, `>`, `"` and `'` for inclusion in text content or a
/// double-quoted attribute value.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape(r#"say "hi" it's"#), "say &quot;hi&quot; it&#x27;s");
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escape("Hello, world!"), "Hello, world!");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_is_not_idempotent_on_entities() {
        // An already escaped string is escaped again; callers must escape raw text only.
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }
}
