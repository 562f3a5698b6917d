use core::fmt;

use h2j_dom::Position;

/// An attribute on a start tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Value with character references decoded. Empty when the attribute
    /// was written without `=`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// A lexical event handed to the tree builder.
///
/// Every token carries the [`Position`] of its first character: the `<` of
/// a tag or declaration, or the first character of a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attr=value ...>` or `<name ... />`.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Set when the tag ended with `/>`.
        self_closing: bool,
        /// Attributes in source order. Duplicates are kept here and resolved
        /// by the tree builder.
        attributes: Vec<Attribute>,
        /// Where the `<` was.
        position: Position,
    },

    /// `</name>`.
    EndTag {
        /// Lowercased tag name.
        name: String,
        /// Where the `<` was.
        position: Position,
    },

    /// A maximal run of character data, verbatim.
    Text {
        /// The raw characters.
        data: String,
        /// Where the run started.
        position: Position,
    },

    /// `<!...>` markup such as `<!DOCTYPE html>`.
    Declaration {
        /// Everything between `<!` and `>`.
        content: String,
        /// Where the `<` was.
        position: Position,
    },
}

impl Token {
    /// "When a start or end tag token is created, its self-closing flag must be
    /// unset (its other state is that it be set), and its attributes list must
    /// be empty."
    #[must_use]
    pub const fn new_start_tag(position: Position) -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
            position,
        }
    }

    /// Create a new end tag token with an empty name.
    #[must_use]
    pub const fn new_end_tag(position: Position) -> Self {
        Self::EndTag {
            name: String::new(),
            position,
        }
    }

    /// Create a new declaration token with empty content.
    #[must_use]
    pub const fn new_declaration(position: Position) -> Self {
        Self::Declaration {
            content: String::new(),
            position,
        }
    }

    /// Where this token starts in the source.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::StartTag { position, .. }
            | Self::EndTag { position, .. }
            | Self::Text { position, .. }
            | Self::Declaration { position, .. } => *position,
        }
    }

    // Mutation helpers for the tokenizer state machine. Calls on a token
    // variant that has no such field are ignored.

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "Append the current input character to the current tag token's tag name."
    pub fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name, .. } = self {
            name.push(c);
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    ///
    /// "Set the self-closing flag of the current tag token."
    pub fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token. Set that attribute
    /// name and value to the empty string."
    pub fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } = self {
            attributes.push(Attribute::new(String::new(), String::new()));
        }
    }

    /// "Append the current input character to the current attribute's name."
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.name.push(c);
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub fn append_to_current_attribute_value(&mut self, s: &str) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.value.push_str(s);
        }
    }

    /// Append a character to a declaration's content.
    pub fn append_to_declaration(&mut self, c: char) {
        if let Self::Declaration { content, .. } = self {
            content.push(c);
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                self_closing,
                attributes,
                position,
            } => {
                write!(f, "{position}: StartTag <{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, position } => write!(f, "{position}: EndTag </{name}>"),
            Self::Text { data, position } => write!(f, "{position}: Text {data:?}"),
            Self::Declaration { content, position } => {
                write!(f, "{position}: Declaration <!{content}>")
            }
        }
    }
}
