//! Character reference decoding.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The tokenizer decodes references inside attribute values as it reads
//! them. Character data is kept raw on the tree, so the code generator uses
//! [`decode_character_references`] when it turns literal text into a string.

use super::named_character_references::longest_match;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Null, surrogates and values above U+10FFFF become U+FFFD.
fn code_point_to_char(value: u32) -> char {
    if value == 0 {
        return char::REPLACEMENT_CHARACTER;
    }
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Match a numeric reference. `input` starts right after `&#`.
fn match_numeric(input: &str) -> Option<(String, usize)> {
    let (radix, prefix_len) = match input.chars().next() {
        Some('x' | 'X') => (16, 1),
        _ => (10, 0),
    };
    let digits: &str = {
        let body = &input[prefix_len..];
        let end = body
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(body.len());
        &body[..end]
    };
    if digits.is_empty() {
        return None;
    }
    // Overlong references saturate to an invalid code point.
    let value = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);
    let mut consumed = prefix_len + digits.len();
    if input[consumed..].starts_with(';') {
        consumed += 1;
    }
    Some((code_point_to_char(value).to_string(), consumed))
}

/// Match a character reference at the start of `input`, which begins right
/// after the `&`.
///
/// Returns the replacement text and the number of bytes consumed from
/// `input`. `None` means the `&` is literal.
///
/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state):
/// "If the character reference was consumed as part of an attribute, and the
/// last character matched is not a U+003B SEMICOLON character (;), and the
/// next input character is either a U+003D EQUALS SIGN character (=) or an
/// ASCII alphanumeric, then, for historical reasons, flush code points
/// consumed as a character reference and switch to the return state."
#[must_use]
pub fn match_reference(input: &str, in_attribute: bool) -> Option<(String, usize)> {
    if let Some(numeric) = input.strip_prefix('#') {
        return match_numeric(numeric).map(|(text, len)| (text, len + 1));
    }

    let (name, value) = longest_match(input)?;
    if in_attribute && !name.ends_with(';') {
        let next = input[name.len()..].chars().next();
        if next.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric()) {
            return None;
        }
    }
    Some((value.to_string(), name.len()))
}

/// Replace every character reference in `text` with the character it names.
/// Unrecognized references are left untouched.
#[must_use]
pub fn decode_character_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp + 1..];
        if let Some((replacement, consumed)) = match_reference(rest, false) {
            out.push_str(&replacement);
            rest = &rest[consumed..];
        } else {
            out.push('&');
        }
    }
    out.push_str(rest);
    out
}
