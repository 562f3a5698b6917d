//! Instruction generation.
//!
//! A pre-order walk over the node tree, dispatching on [`ElementKind`]:
//! plain elements open and close a tag, text is split into literal and
//! bound pieces, and control elements open `if`, `else` and `for` blocks.
//! The content of `<script>` and `<style>` is copied verbatim: no
//! character reference decoding and no `{{...}}` bindings.
//! Local names (`e0`, `t1`, `c2`, ...) come from a counter owned by the
//! [`Generator`], so every compilation numbers its locals independently.

use h2j_dom::{DomTree, ElementData, ElementKind, NodeId, NodeType, Position};
use h2j_html::{decode_character_references, is_raw_text_element};
use h2j_template::{TemplateSegment, has_bindings, parse_template, split_path};

use crate::error::GenerateError;
use crate::instruction::{Instruction, Program};

/// Attribute of `<if>` holding the condition path.
pub const IF_TEST_ATTRIBUTE: &str = "test";
/// Attribute of `<for>` holding the collection path.
pub const FOR_EACH_ATTRIBUTE: &str = "each";
/// Attribute of `<for>` naming the loop variable.
pub const FOR_AS_ATTRIBUTE: &str = "as";

/// Result type for generation.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// After the first component, list indices such as `items.0` are allowed.
fn is_valid_path(path: &[String]) -> bool {
    path.split_first().is_some_and(|(first, rest)| {
        is_identifier(first)
            && rest.iter().all(|component| {
                is_identifier(component)
                    || (!component.is_empty() && component.bytes().all(|b| b.is_ascii_digit()))
            })
    })
}

fn checked_path(path: Vec<String>, position: Position) -> Result<Vec<String>> {
    if is_valid_path(&path) {
        Ok(path)
    } else {
        Err(GenerateError::InvalidBindingPath {
            path: path.join("."),
            position,
        })
    }
}

fn required_attribute<'a>(
    data: &'a ElementData,
    attribute: &str,
    position: Position,
) -> Result<&'a str> {
    data.attr(attribute)
        .ok_or_else(|| GenerateError::MissingAttribute {
            tag: data.tag_name.clone(),
            attribute: attribute.to_string(),
            position,
        })
}

/// Turns a [`DomTree`] into a [`Program`].
#[derive(Debug, Default)]
pub struct Generator {
    counter: usize,
    instructions: Vec<Instruction>,
}

impl Generator {
    /// A generator with its local-name counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the program for `tree`.
    ///
    /// # Errors
    ///
    /// Returns the first [`GenerateError`] met in document order. No
    /// partial program is returned.
    pub fn generate(mut self, tree: &DomTree) -> Result<Program> {
        self.visit_children(tree, tree.root())?;
        Ok(Program::new(self.instructions))
    }

    /// Mint a fresh local name.
    fn mint(&mut self, prefix: char) -> String {
        let ident = format!("{prefix}{}", self.counter);
        self.counter += 1;
        ident
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Visit the children of `parent` in order, pairing every `<else>` with
    /// the nearest preceding `<if>`. Only whitespace-only text may sit
    /// between the two.
    fn visit_children(&mut self, tree: &DomTree, parent: NodeId) -> Result<()> {
        let raw_text = tree
            .as_element(parent)
            .is_some_and(|data| is_raw_text_element(&data.tag_name));
        let mut open_if: Option<String> = None;
        for &child in tree.children(parent) {
            let Some(node) = tree.get(child) else {
                continue;
            };
            match &node.node_type {
                NodeType::Text(text) if raw_text => {
                    let ident = self.mint('t');
                    self.emit(Instruction::Text {
                        ident,
                        content: text.clone(),
                    });
                }
                NodeType::Element(data) if data.kind == ElementKind::If => {
                    open_if = Some(self.visit_if(tree, child, data, node.position)?);
                }
                NodeType::Element(data) if data.kind == ElementKind::Else => {
                    let condition = open_if.take().ok_or(GenerateError::DanglingElse {
                        position: node.position,
                    })?;
                    self.emit(Instruction::BeginElse { condition });
                    self.visit_children(tree, child)?;
                    self.emit(Instruction::EndElse);
                }
                NodeType::Text(text) if text.trim().is_empty() => {
                    self.visit_text(text, node.position)?;
                }
                _ => {
                    open_if = None;
                    self.visit(tree, child)?;
                }
            }
        }
        Ok(())
    }

    fn visit(&mut self, tree: &DomTree, id: NodeId) -> Result<()> {
        let Some(node) = tree.get(id) else {
            return Ok(());
        };
        match &node.node_type {
            NodeType::Declaration(content) => {
                self.emit(Instruction::Declaration {
                    content: content.clone(),
                });
                Ok(())
            }
            NodeType::Text(text) => self.visit_text(text, node.position),
            NodeType::Element(data) => match data.kind {
                ElementKind::Root => self.visit_children(tree, id),
                ElementKind::Element => self.visit_element(tree, id, data),
                ElementKind::If => self.visit_if(tree, id, data, node.position).map(drop),
                ElementKind::Else => Err(GenerateError::DanglingElse {
                    position: node.position,
                }),
                ElementKind::For => self.visit_for(tree, id, data, node.position),
            },
        }
    }

    fn visit_element(&mut self, tree: &DomTree, id: NodeId, data: &ElementData) -> Result<()> {
        let ident = self.mint('e');
        self.emit(Instruction::OpenElement {
            ident,
            tag: data.tag_name.clone(),
            attributes: data.attrs.clone(),
            is_void: data.is_void,
        });
        self.visit_children(tree, id)?;
        if !data.is_void {
            self.emit(Instruction::CloseElement {
                tag: data.tag_name.clone(),
            });
        }
        Ok(())
    }

    fn visit_text(&mut self, raw: &str, position: Position) -> Result<()> {
        if !has_bindings(raw) {
            let ident = self.mint('t');
            self.emit(Instruction::Text {
                ident,
                content: decode_character_references(raw),
            });
            return Ok(());
        }
        for segment in parse_template(raw) {
            match segment {
                TemplateSegment::Literal(text) => {
                    let ident = self.mint('t');
                    self.emit(Instruction::Text {
                        ident,
                        content: decode_character_references(&text),
                    });
                }
                TemplateSegment::Binding(path) => {
                    let path = checked_path(path, position)?;
                    let ident = self.mint('b');
                    self.emit(Instruction::BoundText {
                        ident,
                        path,
                        position,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the local name holding the condition, for a following `<else>`.
    fn visit_if(
        &mut self,
        tree: &DomTree,
        id: NodeId,
        data: &ElementData,
        position: Position,
    ) -> Result<String> {
        let test = required_attribute(data, IF_TEST_ATTRIBUTE, position)?;
        let condition = checked_path(split_path(test), position)?;
        let ident = self.mint('c');
        self.emit(Instruction::BeginIf {
            ident: ident.clone(),
            condition,
            position,
        });
        self.visit_children(tree, id)?;
        self.emit(Instruction::EndIf);
        Ok(ident)
    }

    fn visit_for(
        &mut self,
        tree: &DomTree,
        id: NodeId,
        data: &ElementData,
        position: Position,
    ) -> Result<()> {
        let each = required_attribute(data, FOR_EACH_ATTRIBUTE, position)?;
        let collection = checked_path(split_path(each), position)?;
        let item = required_attribute(data, FOR_AS_ATTRIBUTE, position)?.trim();
        if !is_identifier(item) {
            return Err(GenerateError::InvalidIdentifier {
                tag: data.tag_name.clone(),
                attribute: FOR_AS_ATTRIBUTE.to_string(),
                value: item.to_string(),
                position,
            });
        }
        let ident = self.mint('l');
        self.emit(Instruction::BeginFor {
            ident,
            collection,
            item: item.to_string(),
            position,
        });
        self.visit_children(tree, id)?;
        self.emit(Instruction::EndFor);
        Ok(())
    }
}
