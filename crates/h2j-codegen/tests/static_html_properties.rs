//! Properties of the static HTML rendering: well-formed documents survive a
//! parse and render unchanged, and rendering reaches a fixed point.

use h2j_codegen::{compile, to_html};
use h2j_common::escape;
use h2j_html::parse;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const TAGS: [&str; 8] = ["div", "span", "p", "ul", "li", "b", "if", "for"];
const VOID_TAGS: [&str; 4] = ["br", "img", "hr", "input"];
const ATTRIBUTE_NAMES: [&str; 3] = ["id", "class", "title"];
const ATTRIBUTE_VALUES: [&str; 7] = ["x", "a b", "a&b", "say \"hi\"", "it's", "<>", ""];
const WORDS: [&str; 8] = [
    "hello",
    "a & b",
    "1 < 2",
    "{{user.name}}",
    " ",
    "\n",
    "x&amp;y",
    "q\"uote",
];

/// Markup the tree builder has to recover from.
const NOISE: [&str; 6] = ["</q>", "<div>", "<P Class=x>", "<br/>", "<!-- c -->", "</>"];

/// A well-formed document in canonical form: lowercase tags, every
/// attribute double-quoted and escaped, void elements without end tags.
#[derive(Clone, Debug)]
struct Document(String);

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut out = String::new();
        nodes(g, 3, false, &mut out);
        Self(out)
    }
}

/// A document with stray, unclosed and non-canonical markup mixed in.
#[derive(Clone, Debug)]
struct Sloppy(String);

impl Arbitrary for Sloppy {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut out = String::new();
        nodes(g, 3, true, &mut out);
        Self(out)
    }
}

fn pick<'a>(g: &mut Gen, options: &[&'a str]) -> &'a str {
    g.choose(options).copied().unwrap_or_default()
}

fn attributes(g: &mut Gen, out: &mut String) {
    for name in ATTRIBUTE_NAMES {
        if bool::arbitrary(g) {
            let value = pick(g, &ATTRIBUTE_VALUES);
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
    }
}

fn nodes(g: &mut Gen, depth: usize, noisy: bool, out: &mut String) {
    for _ in 0..usize::arbitrary(g) % 4 {
        match u8::arbitrary(g) % 5 {
            0 if depth > 0 => {
                let tag = pick(g, &TAGS);
                out.push('<');
                out.push_str(tag);
                attributes(g, out);
                out.push('>');
                nodes(g, depth - 1, noisy, out);
                out.push_str(&format!("</{tag}>"));
            }
            1 => {
                out.push('<');
                out.push_str(pick(g, &VOID_TAGS));
                attributes(g, out);
                out.push('>');
            }
            2 if noisy => out.push_str(pick(g, &NOISE)),
            _ => out.push_str(pick(g, &WORDS)),
        }
    }
}

#[quickcheck]
fn prop_canonical_document_round_trips(document: Document) -> bool {
    to_html(&parse(&document.0)) == document.0
}

#[quickcheck]
fn prop_rendering_reaches_fixed_point(document: Sloppy) -> bool {
    let once = to_html(&parse(&document.0));
    to_html(&parse(&once)) == once
}

#[quickcheck]
fn prop_compile_is_total(input: String) -> bool {
    let _ = compile(&input);
    true
}

#[test]
fn test_void_siblings_render_without_end_tags() {
    let source = r#"<br><img src="a.png" alt="&quot;x&quot;"><hr>"#;
    assert_eq!(
        to_html(&parse(source)),
        r#"<br><img src="a.png" alt="&quot;x&quot;"><hr>"#
    );
    assert_eq!(to_html(&parse("<br/><input   type=text />")), r#"<br><input type="text">"#);
}

#[test]
fn test_stray_end_tags_leave_an_empty_root() {
    assert_eq!(to_html(&parse("</a></b></c>")), "");
}

#[test]
fn test_unclosed_elements_are_closed() {
    assert_eq!(to_html(&parse("<div><p>text")), "<div><p>text</p></div>");
}

#[test]
fn test_unterminated_markup_is_kept_as_text() {
    for source in ["a<?x", "a<!x", "a</ x", "a<div class", "a<!-- open"] {
        assert_eq!(to_html(&parse(source)), source);
    }
}

#[test]
fn test_comments_are_dropped() {
    assert_eq!(to_html(&parse("a<!-- note -->b")), "ab");
}
