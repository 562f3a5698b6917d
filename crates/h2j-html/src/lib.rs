//! HTML front end for the html2js compiler.
//!
//! [`HTMLTokenizer`] turns template source into a lazy stream of
//! [`Token`]s and [`TreeBuilder`] assembles them into a
//! [`DomTree`]. Both are total: malformed markup is recovered from, never
//! rejected, and the problems are reported as warnings.
//!
//! ```
//! let tree = h2j_html::parse("<p>Hello, {{user.name}}!</p>");
//! assert_eq!(tree.children(tree.root()).len(), 1);
//! ```

/// Tree construction from tokens.
pub mod parser;
/// Tokenization of template source.
pub mod tokenizer;

use h2j_dom::{CustomElementRegistry, DomTree};

pub use parser::{
    ParseIssue, TreeBuilder, format_tree, is_raw_text_element, is_void_element, print_tree,
};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, decode_character_references};

/// Parse `source` with the built-in element registry.
#[must_use]
pub fn parse(source: &str) -> DomTree {
    parse_with_registry(source, CustomElementRegistry::global())
}

/// Parse `source`, creating elements through `registry`.
#[must_use]
pub fn parse_with_registry(source: &str, registry: &CustomElementRegistry) -> DomTree {
    TreeBuilder::new(registry).run(HTMLTokenizer::new(source.to_string()))
}

/// Parse `source` with the built-in registry and also return every issue
/// the tree builder recovered from.
#[must_use]
pub fn parse_with_issues(source: &str) -> (DomTree, Vec<ParseIssue>) {
    TreeBuilder::new(CustomElementRegistry::global())
        .run_with_issues(HTMLTokenizer::new(source.to_string()))
}
