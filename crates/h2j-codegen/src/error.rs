//! Error types for code generation and data preview.

use h2j_dom::Position;
use thiserror::Error;

/// A structural or referential defect found while generating code.
///
/// Generation stops at the first error; no partial program is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// An `<else>` whose nearest preceding sibling (ignoring whitespace-only
    /// text) is not an `<if>`.
    #[error("<else> without a preceding <if> sibling at {position}")]
    DanglingElse {
        /// Where the `<else>` starts.
        position: Position,
    },

    /// A binding path with an empty or non-identifier component.
    #[error("invalid binding path `{path}` at {position}")]
    InvalidBindingPath {
        /// The path as written, components joined with `.`.
        path: String,
        /// Where the text node or control element starts.
        position: Position,
    },

    /// A control element without one of its required attributes.
    #[error("<{tag}> requires a `{attribute}` attribute at {position}")]
    MissingAttribute {
        /// Tag name of the control element.
        tag: String,
        /// The missing attribute.
        attribute: String,
        /// Where the element starts.
        position: Position,
    },

    /// A loop variable name that is not an identifier.
    #[error("`{value}` in the `{attribute}` attribute of <{tag}> is not an identifier at {position}")]
    InvalidIdentifier {
        /// Tag name of the control element.
        tag: String,
        /// The offending attribute.
        attribute: String,
        /// Its value.
        value: String,
        /// Where the element starts.
        position: Position,
    },
}

impl GenerateError {
    /// Source position of the offending construct.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::DanglingElse { position }
            | Self::InvalidBindingPath { position, .. }
            | Self::MissingAttribute { position, .. }
            | Self::InvalidIdentifier { position, .. } => *position,
        }
    }
}

/// Errors raised while rendering a program against preview data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// A binding whose first name is neither a loop variable nor a key of
    /// the data object.
    #[error("undefined variable `{name}` at {position}")]
    UndefinedVariable {
        /// The unresolved name.
        name: String,
        /// Where the binding's text node starts.
        position: Position,
    },

    /// A `<for>` collection that is neither a list nor missing.
    #[error("`{path}` is not a list at {position}")]
    NotIterable {
        /// The collection path, joined with `.`.
        path: String,
        /// Where the `<for>` starts.
        position: Position,
    },

    /// Preview data must be a JSON object.
    #[error("preview data must be a JSON object")]
    RootNotObject,
}
