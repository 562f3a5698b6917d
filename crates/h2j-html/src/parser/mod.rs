//! Tree construction.
//!
//! Turns the token stream into a [`DomTree`](h2j_dom::DomTree) with a stack
//! of open elements. There is no insertion-mode machinery: the only
//! structural rules are void elements and end-tag recovery.

/// Indented tree dumps for debugging.
pub mod dump;
/// The stack-based tree builder.
pub mod tree_builder;

pub use dump::{format_tree, print_tree};
pub use tree_builder::{
    ParseIssue, RAW_TEXT_ELEMENTS, TreeBuilder, VOID_ELEMENTS, is_raw_text_element,
    is_void_element,
};
