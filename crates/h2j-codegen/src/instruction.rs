//! The instruction sequence produced by the [`Generator`](crate::Generator).
//!
//! A [`Program`] is the flat, pre-order form of a template: element and
//! text construction interleaved with begin/end markers for control blocks.
//! The JavaScript emitter lowers it to code; the preview interpreter runs it
//! directly.

use core::fmt;

use h2j_dom::{AttributesMap, Position};

/// One generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Emit a markup declaration verbatim.
    Declaration {
        /// Everything between `<!` and `>`.
        content: String,
    },
    /// Create an element and append it to the current parent. Unless void,
    /// it becomes the parent until the matching [`Instruction::CloseElement`].
    OpenElement {
        /// Local name of the created element.
        ident: String,
        /// Tag name.
        tag: String,
        /// Attributes in source order.
        attributes: AttributesMap,
        /// Void elements have no matching close.
        is_void: bool,
    },
    /// Finish the innermost open element.
    CloseElement {
        /// Tag name, for listings.
        tag: String,
    },
    /// Append a literal text node.
    Text {
        /// Local name of the created node.
        ident: String,
        /// The text with character references decoded.
        content: String,
    },
    /// Append a text node that shows the value at `path` and follows its
    /// changes.
    BoundText {
        /// Local name of the created node.
        ident: String,
        /// Field path, first component resolved through the scope chain.
        path: Vec<String>,
        /// Where the text node starts.
        position: Position,
    },
    /// Evaluate `condition` once and run the block when it is truthy.
    BeginIf {
        /// Local name holding the evaluated condition.
        ident: String,
        /// Field path of the condition.
        condition: Vec<String>,
        /// Where the `<if>` starts.
        position: Position,
    },
    /// End of an `if` block.
    EndIf,
    /// Run the block when the paired `if` condition was falsy.
    BeginElse {
        /// The `ident` of the paired [`Instruction::BeginIf`].
        condition: String,
    },
    /// End of an `else` block.
    EndElse,
    /// Run the block once per item of `collection`, binding each item to
    /// `item`.
    BeginFor {
        /// Local name of the loop.
        ident: String,
        /// Field path of the collection.
        collection: Vec<String>,
        /// Loop variable name.
        item: String,
        /// Where the `<for>` starts.
        position: Position,
    },
    /// End of a `for` block.
    EndFor,
}

impl Instruction {
    /// Returns true for instructions that open a nesting level.
    #[must_use]
    pub const fn opens_block(&self) -> bool {
        matches!(
            self,
            Self::OpenElement { is_void: false, .. }
                | Self::BeginIf { .. }
                | Self::BeginElse { .. }
                | Self::BeginFor { .. }
        )
    }

    /// Returns true for instructions that close a nesting level.
    #[must_use]
    pub const fn closes_block(&self) -> bool {
        matches!(
            self,
            Self::CloseElement { .. } | Self::EndIf | Self::EndElse | Self::EndFor
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration { content } => write!(f, "declaration <!{content}>"),
            Self::OpenElement {
                ident,
                tag,
                attributes,
                is_void,
            } => {
                write!(f, "element {ident} <{tag}")?;
                for (name, value) in attributes {
                    write!(f, " {name}={value:?}")?;
                }
                write!(f, ">")?;
                if *is_void {
                    write!(f, " void")?;
                }
                Ok(())
            }
            Self::CloseElement { tag } => write!(f, "end </{tag}>"),
            Self::Text { ident, content } => write!(f, "text {ident} {content:?}"),
            Self::BoundText { ident, path, .. } => {
                write!(f, "bind {ident} {{{{{}}}}}", path.join("."))
            }
            Self::BeginIf {
                ident, condition, ..
            } => write!(f, "if {ident} = {}", condition.join(".")),
            Self::EndIf => write!(f, "end if"),
            Self::BeginElse { condition } => write!(f, "else !{condition}"),
            Self::EndElse => write!(f, "end else"),
            Self::BeginFor {
                ident,
                collection,
                item,
                ..
            } => write!(f, "for {ident} {item} in {}", collection.join(".")),
            Self::EndFor => write!(f, "end for"),
        }
    }
}

/// A complete, successfully generated instruction sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Wrap an instruction sequence.
    #[must_use]
    pub const fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// The instructions in execution order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the template produced nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// For every instruction that opens a control block (`if`, `else`,
    /// `for`), the index of its matching end instruction.
    #[must_use]
    pub fn block_ends(&self) -> Vec<Option<usize>> {
        let mut ends = vec![None; self.instructions.len()];
        let mut open = Vec::new();
        for (index, instruction) in self.instructions.iter().enumerate() {
            match instruction {
                Instruction::BeginIf { .. }
                | Instruction::BeginElse { .. }
                | Instruction::BeginFor { .. } => open.push(index),
                Instruction::EndIf | Instruction::EndElse | Instruction::EndFor => {
                    if let Some(begin) = open.pop() {
                        ends[begin] = Some(index);
                    }
                }
                _ => {}
            }
        }
        ends
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        for instruction in &self.instructions {
            if instruction.closes_block() {
                depth = depth.saturating_sub(1);
            }
            writeln!(f, "{}{instruction}", "  ".repeat(depth))?;
            if instruction.opens_block() {
                depth += 1;
            }
        }
        Ok(())
    }
}
