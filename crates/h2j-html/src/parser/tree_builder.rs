use core::fmt;

use h2j_common::warning::warn_once;
use h2j_dom::{AttributesMap, CustomElementRegistry, DomTree, NodeId, NodeType, Position};

use crate::tokenizer::{Attribute, Token};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements." Also covers the obsolete `command`, `keygen` and
/// `menuitem`, which older documents still write without an end tag.
pub const VOID_ELEMENTS: [&str; 17] = [
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "menuitem", "meta", "param", "source", "track", "wbr",
];

/// Returns true if `tag_name` (lowercase) is a void element.
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// [§ 13.1.2.1 Raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
///
/// Their content is a single verbatim text run.
pub const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Returns true if `tag_name` (lowercase) is a raw text element.
#[must_use]
pub fn is_raw_text_element(tag_name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag_name)
}

/// A recoverable problem met while building the tree.
///
/// Building never fails. Issues are collected for callers that want to
/// report them and are also printed through the warning channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What was recovered from.
    pub message: String,
    /// Where the offending token starts.
    pub position: Position,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

/// Builds a [`DomTree`] from tokens.
///
/// - A start tag creates an element through the registry and appends it to
///   the current node. It is pushed onto the stack of open elements unless
///   it is void or written self-closing.
/// - Text and declarations are appended to the current node.
/// - An end tag pops the stack until an element with the same tag name has
///   been popped. When no open element matches, every open element is
///   closed and the end tag is discarded. End tags of void elements are
///   ignored.
pub struct TreeBuilder<'r> {
    registry: &'r CustomElementRegistry,
    tree: DomTree,
    /// The root element stays at the bottom for the whole parse.
    stack_of_open_elements: Vec<NodeId>,
    issues: Vec<ParseIssue>,
}

impl<'r> TreeBuilder<'r> {
    /// A builder whose elements are created through `registry`.
    #[must_use]
    pub fn new(registry: &'r CustomElementRegistry) -> Self {
        Self {
            registry,
            tree: DomTree::new(),
            stack_of_open_elements: vec![NodeId::ROOT],
            issues: Vec::new(),
        }
    }

    /// Consume `tokens` and return the finished tree.
    #[must_use]
    pub fn run(self, tokens: impl IntoIterator<Item = Token>) -> DomTree {
        self.run_with_issues(tokens).0
    }

    /// Consume `tokens` and return the finished tree together with every
    /// issue that was recovered from.
    #[must_use]
    pub fn run_with_issues(
        mut self,
        tokens: impl IntoIterator<Item = Token>,
    ) -> (DomTree, Vec<ParseIssue>) {
        for token in tokens {
            self.process_token(token);
        }
        self.finish();
        (self.tree, self.issues)
    }

    /// Feed a single token.
    pub fn process_token(&mut self, token: Token) {
        match token {
            Token::StartTag {
                name,
                self_closing,
                attributes,
                position,
            } => self.insert_element(&name, &attributes, self_closing, position),
            Token::EndTag { name, position } => self.close_element(&name, position),
            Token::Text { data, position } => {
                let parent = self.current_node();
                let id = self.tree.alloc(NodeType::Text(data), position);
                self.tree.append_child(parent, id);
            }
            Token::Declaration { content, position } => {
                let parent = self.current_node();
                let id = self.tree.alloc(NodeType::Declaration(content), position);
                self.tree.append_child(parent, id);
            }
        }
    }

    /// The last attribute with a given name wins; the map keeps the order in
    /// which names first appeared.
    fn attributes_to_map(attributes: &[Attribute]) -> AttributesMap {
        attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect()
    }

    /// "The current node is the bottommost node in this stack of open elements."
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn tag_name_of(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|data| data.tag_name.as_str())
    }

    fn insert_element(
        &mut self,
        tag_name: &str,
        attributes: &[Attribute],
        self_closing: bool,
        position: Position,
    ) {
        let is_void = is_void_element(tag_name);
        let data = self
            .registry
            .create_element(tag_name, Self::attributes_to_map(attributes))
            .with_void(is_void);
        let parent = self.current_node();
        let id = self.tree.alloc(NodeType::Element(data), position);
        self.tree.append_child(parent, id);

        if !is_void && !self_closing {
            self.stack_of_open_elements.push(id);
        }
    }

    fn close_element(&mut self, tag_name: &str, position: Position) {
        if is_void_element(tag_name) {
            return;
        }

        let has_match = self.stack_of_open_elements[1..]
            .iter()
            .any(|&id| self.tag_name_of(id) == Some(tag_name));

        if !has_match {
            let open = self.stack_of_open_elements.len() - 1;
            self.stack_of_open_elements.truncate(1);
            let message = if open == 0 {
                format!("discarded unmatched end tag </{tag_name}>")
            } else {
                format!(
                    "discarded unmatched end tag </{tag_name}> after closing {open} open element(s)"
                )
            };
            self.parse_warning(message, position);
            return;
        }

        while let Some(id) = self.stack_of_open_elements.pop() {
            let Some(open_tag) = self.tag_name_of(id) else {
                continue;
            };
            if open_tag == tag_name {
                break;
            }
            let message = format!("<{open_tag}> implicitly closed by </{tag_name}>");
            self.parse_warning(message, position);
        }
    }

    /// Report elements still open at the end of input.
    fn finish(&mut self) {
        let unclosed: Vec<(String, Position)> = self.stack_of_open_elements[1..]
            .iter()
            .filter_map(|&id| {
                let tag = self.tag_name_of(id)?.to_string();
                Some((tag, self.tree.position(id)?))
            })
            .collect();
        for (tag, position) in unclosed {
            self.parse_warning(format!("<{tag}> not closed before end of input"), position);
        }
        self.stack_of_open_elements.truncate(1);
    }

    fn parse_warning(&mut self, message: String, position: Position) {
        warn_once("Tree Builder", &format!("{message} at {position}"));
        self.issues.push(ParseIssue { message, position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_element_list() {
        assert!(is_void_element("br"));
        assert!(is_void_element("menuitem"));
        assert!(!is_void_element("div"));
        assert!(!is_void_element("BR"));
    }

    #[test]
    fn test_attributes_to_map_last_duplicate_wins() {
        let attrs = vec![
            Attribute::new("a".to_string(), "1".to_string()),
            Attribute::new("b".to_string(), "2".to_string()),
            Attribute::new("a".to_string(), "3".to_string()),
        ];
        let map = TreeBuilder::attributes_to_map(&attrs);
        let pairs: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }
}
