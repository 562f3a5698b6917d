//! Property tests: tokenizing and parsing are total and order-preserving.

use h2j_dom::{NodeId, Position};
use h2j_html::{HTMLTokenizer, Token, parse};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[quickcheck]
fn prop_parse_is_total(source: String) -> bool {
    let tree = parse(&source);
    tree.as_element(NodeId::ROOT).is_some()
}

#[quickcheck]
fn prop_token_positions_strictly_increase(source: String) -> bool {
    let positions: Vec<Position> = HTMLTokenizer::new(source).map(|t| t.position()).collect();
    positions.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn prop_markup_free_input_is_one_text_token(source: String) -> TestResult {
    if source.is_empty() || source.contains('<') {
        return TestResult::discard();
    }
    let tokens: Vec<Token> = HTMLTokenizer::new(source.clone()).collect();
    TestResult::from_bool(
        tokens
            == vec![Token::Text {
                data: source,
                position: Position::START,
            }],
    )
}
