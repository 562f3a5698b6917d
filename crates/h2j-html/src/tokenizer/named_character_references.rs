//! Named character reference table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! A subset of the 2,231 entities the HTML standard defines: the markup
//! metacharacters, typographic punctuation, currency, math, arrows and the
//! common Latin-1 letters. Names are stored without the leading `&`. Entries
//! without a trailing `;` are the legacy forms browsers still accept.

/// `(name, replacement)` pairs.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp;", "&"),
    ("amp", "&"),
    ("lt;", "<"),
    ("lt", "<"),
    ("gt;", ">"),
    ("gt", ">"),
    ("quot;", "\""),
    ("quot", "\""),
    ("apos;", "'"),
    ("nbsp;", "\u{00A0}"),
    ("nbsp", "\u{00A0}"),
    ("copy;", "\u{00A9}"),
    ("copy", "\u{00A9}"),
    ("reg;", "\u{00AE}"),
    ("reg", "\u{00AE}"),
    ("trade;", "\u{2122}"),
    ("mdash;", "\u{2014}"),
    ("ndash;", "\u{2013}"),
    ("hellip;", "\u{2026}"),
    ("bull;", "\u{2022}"),
    ("middot;", "\u{00B7}"),
    ("sect;", "\u{00A7}"),
    ("para;", "\u{00B6}"),
    ("lsquo;", "\u{2018}"),
    ("rsquo;", "\u{2019}"),
    ("ldquo;", "\u{201C}"),
    ("rdquo;", "\u{201D}"),
    ("laquo;", "\u{00AB}"),
    ("raquo;", "\u{00BB}"),
    ("cent;", "\u{00A2}"),
    ("pound;", "\u{00A3}"),
    ("euro;", "\u{20AC}"),
    ("yen;", "\u{00A5}"),
    ("times;", "\u{00D7}"),
    ("divide;", "\u{00F7}"),
    ("plusmn;", "\u{00B1}"),
    ("minus;", "\u{2212}"),
    ("ne;", "\u{2260}"),
    ("le;", "\u{2264}"),
    ("ge;", "\u{2265}"),
    ("deg;", "\u{00B0}"),
    ("frac12;", "\u{00BD}"),
    ("frac14;", "\u{00BC}"),
    ("frac34;", "\u{00BE}"),
    ("larr;", "\u{2190}"),
    ("rarr;", "\u{2192}"),
    ("uarr;", "\u{2191}"),
    ("darr;", "\u{2193}"),
    ("alpha;", "\u{03B1}"),
    ("beta;", "\u{03B2}"),
    ("gamma;", "\u{03B3}"),
    ("delta;", "\u{03B4}"),
    ("lambda;", "\u{03BB}"),
    ("mu;", "\u{03BC}"),
    ("pi;", "\u{03C0}"),
    ("sigma;", "\u{03C3}"),
    ("omega;", "\u{03C9}"),
    ("Aacute;", "\u{00C1}"),
    ("Auml;", "\u{00C4}"),
    ("aacute;", "\u{00E1}"),
    ("agrave;", "\u{00E0}"),
    ("auml;", "\u{00E4}"),
    ("Eacute;", "\u{00C9}"),
    ("eacute;", "\u{00E9}"),
    ("egrave;", "\u{00E8}"),
    ("iacute;", "\u{00ED}"),
    ("Oacute;", "\u{00D3}"),
    ("Ouml;", "\u{00D6}"),
    ("oacute;", "\u{00F3}"),
    ("ouml;", "\u{00F6}"),
    ("Uacute;", "\u{00DA}"),
    ("Uuml;", "\u{00DC}"),
    ("uacute;", "\u{00FA}"),
    ("uuml;", "\u{00FC}"),
    ("szlig;", "\u{00DF}"),
    ("ntilde;", "\u{00F1}"),
    ("Ntilde;", "\u{00D1}"),
    ("ccedil;", "\u{00E7}"),
    ("Ccedil;", "\u{00C7}"),
];

/// Look up a named character reference by its exact name.
///
/// The `name` should NOT include the leading `&`.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, value)| *value)
}

/// Find the longest entity name that `input` starts with.
///
/// "Consume the maximum number of characters possible, where the consumed
/// characters are one of the identifiers in the named character references
/// table."
#[must_use]
pub fn longest_match(input: &str) -> Option<(&'static str, &'static str)> {
    NAMED_ENTITIES
        .iter()
        .filter(|(entity, _)| input.starts_with(entity))
        .max_by_key(|(entity, _)| entity.len())
        .copied()
}
