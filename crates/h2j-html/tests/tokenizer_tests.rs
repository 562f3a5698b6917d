//! Tests for the HTML tokenizer: tags, attributes, positions and recovery.

use h2j_dom::Position;
use h2j_html::tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState};

/// Helper to tokenize input and return all tokens.
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input.to_string()).into_tokens()
}

fn text(data: &str, line: usize, column: usize) -> Token {
    Token::Text {
        data: data.to_string(),
        position: Position::new(line, column),
    }
}

fn attr(name: &str, value: &str) -> Attribute {
    Attribute::new(name.to_string(), value.to_string())
}

#[test]
fn test_simple_element() {
    let tokens = tokenize(r#"<div class="a" id=b>hi</div>"#);
    assert_eq!(
        tokens,
        vec![
            Token::StartTag {
                name: "div".to_string(),
                self_closing: false,
                attributes: vec![attr("class", "a"), attr("id", "b")],
                position: Position::new(1, 1),
            },
            text("hi", 1, 21),
            Token::EndTag {
                name: "div".to_string(),
                position: Position::new(1, 23),
            },
        ]
    );
}

#[test]
fn test_positions_across_lines() {
    let tokens = tokenize("<p>\n  <b>x</b>");
    let positions: Vec<Position> = tokens.iter().map(Token::position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(1, 1),
            Position::new(1, 4),
            Position::new(2, 3),
            Position::new(2, 6),
            Position::new(2, 7),
        ]
    );
    assert_eq!(tokens[1], text("\n  ", 1, 4));
}

#[test]
fn test_names_are_lowercased() {
    let tokens = tokenize(r#"<DIV Class="X"></Div>"#);
    let Token::StartTag {
        name, attributes, ..
    } = &tokens[0]
    else {
        panic!("expected start tag, got {:?}", tokens[0]);
    };
    assert_eq!(name, "div");
    assert_eq!(attributes, &vec![attr("class", "X")]);
    assert!(matches!(&tokens[1], Token::EndTag { name, .. } if name == "div"));
}

#[test]
fn test_self_closing_flag() {
    let tokens = tokenize("<x/><br />");
    assert!(matches!(
        &tokens[0],
        Token::StartTag { name, self_closing: true, .. } if name == "x"
    ));
    assert!(matches!(
        &tokens[1],
        Token::StartTag { name, self_closing: true, .. } if name == "br"
    ));
}

#[test]
fn test_attribute_without_value_and_duplicates() {
    let tokens = tokenize("<input disabled x=1 x=2>");
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(
        attributes,
        &vec![attr("disabled", ""), attr("x", "1"), attr("x", "2")]
    );
}

#[test]
fn test_single_quoted_and_unquoted_values() {
    let tokens = tokenize("<a title='say \"hi\"' href=/x>");
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(
        attributes,
        &vec![attr("title", "say \"hi\""), attr("href", "/x")]
    );
}

#[test]
fn test_character_references_decoded_in_attributes_only() {
    let tokens = tokenize(r#"<a title="&lt;x&gt; &amp; &copy=1" href=?a=1&b=2>&amp;</a>"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(
        attributes,
        &vec![attr("title", "<x> & &copy=1"), attr("href", "?a=1&b=2")]
    );
    assert!(matches!(&tokens[1], Token::Text { data, .. } if data == "&amp;"));
}

#[test]
fn test_unterminated_tag_becomes_text() {
    assert_eq!(tokenize("a<div class"), vec![text("a<div class", 1, 1)]);
    assert_eq!(tokenize("<p title=\"open"), vec![text("<p title=\"open", 1, 1)]);
}

#[test]
fn test_stray_less_than_is_text() {
    assert_eq!(tokenize("1 < 2"), vec![text("1 < 2", 1, 1)]);
    assert_eq!(tokenize("a <"), vec![text("a <", 1, 1)]);
}

#[test]
fn test_comments_and_processing_instructions_dropped() {
    assert_eq!(tokenize("a<!-- <b>x</b> -->b"), vec![text("ab", 1, 1)]);
    assert_eq!(tokenize("<?xml version=\"1.0\"?>x"), vec![text("x", 1, 22)]);
    assert_eq!(tokenize("a</>b"), vec![text("ab", 1, 1)]);
}

#[test]
fn test_unterminated_comment_becomes_text() {
    assert_eq!(tokenize("x<!-- never closed"), vec![text("x<!-- never closed", 1, 1)]);
}

#[test]
fn test_unterminated_bogus_comment_becomes_text() {
    assert_eq!(tokenize("a<?x"), vec![text("a<?x", 1, 1)]);
    assert_eq!(tokenize("a<!x"), vec![text("a<!x", 1, 1)]);
    assert_eq!(tokenize("a</ x"), vec![text("a</ x", 1, 1)]);
    assert_eq!(tokenize("<?"), vec![text("<?", 1, 1)]);
}

#[test]
fn test_doctype_declaration() {
    let tokens = tokenize("<!DOCTYPE html><p>");
    assert_eq!(
        tokens[0],
        Token::Declaration {
            content: "DOCTYPE html".to_string(),
            position: Position::START,
        }
    );
    assert_eq!(tokens[1].position(), Position::new(1, 16));
}

#[test]
fn test_script_content_is_raw_text() {
    let tokens = tokenize(r#"<script>if (a < b) { x = "</div>"; }</script><p>"#);
    assert_eq!(tokens.len(), 4);
    assert!(
        matches!(&tokens[1], Token::Text { data, .. } if data == r#"if (a < b) { x = "</div>"; }"#)
    );
    assert!(matches!(&tokens[2], Token::EndTag { name, .. } if name == "script"));
    assert!(matches!(&tokens[3], Token::StartTag { name, .. } if name == "p"));
}

#[test]
fn test_style_end_tag_is_case_insensitive() {
    let tokens = tokenize("<style>p > a { color: red }</STYLE>");
    assert!(matches!(&tokens[1], Token::Text { data, .. } if data == "p > a { color: red }"));
    assert!(matches!(&tokens[2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_tokenizer_is_lazy() {
    let mut tokenizer = HTMLTokenizer::new("<a>x</a>".to_string());
    assert_eq!(tokenizer.state(), TokenizerState::Data);
    assert!(matches!(tokenizer.next(), Some(Token::StartTag { .. })));
    assert!(matches!(tokenizer.next(), Some(Token::Text { .. })));
    assert!(matches!(tokenizer.next(), Some(Token::EndTag { .. })));
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_token_display() {
    let token = Token::EndTag {
        name: "p".to_string(),
        position: Position::new(2, 3),
    };
    assert_eq!(token.to_string(), "line 2, column 3: EndTag </p>");
    assert_eq!(TokenizerState::RAWTEXT.to_string(), "RAWTEXT");
}
