//! HTML tokenizer module.
//!
//! A lenient subset of [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
//! tags, attributes, declarations and character data. Comments and
//! processing instructions are consumed without producing tokens.

/// Character reference decoding for attribute values and text literals.
pub mod character_reference;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// HTML tokenizer state machine implementation.
pub mod machine;
/// Named character reference lookup table.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;

pub use character_reference::decode_character_references;
pub use machine::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};
