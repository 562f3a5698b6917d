//! Node tree for the html2js compiler.
//!
//! This crate provides an arena-based tree holding the parsed template
//! document, following the shape of the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) node tree.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.
//!
//! Node variants form a closed set ([`NodeType`]); elements carry an
//! [`ElementKind`] discriminator so the renderers can dispatch exhaustively
//! between plain elements, the synthetic root and the control-flow elements
//! (`<if>`, `<else>`, `<for>`) handed out by the [`CustomElementRegistry`].

/// Custom element registry mapping reserved tag names to element factories.
pub mod registry;

pub use registry::{CustomElementRegistry, ElementFactory};

use std::fmt;

use indexmap::IndexMap;
use strum_macros::{Display, EnumIter};

/// Ordered map of attribute names to values for an element.
///
/// Insertion order is the source order; inserting an existing name replaces
/// its value in place, so the last occurrence of a duplicate attribute wins.
pub type AttributesMap = IndexMap<String, String>;

/// Tag name of the synthetic document root. Never serialized.
pub const ROOT_TAG_NAME: &str = "root-element";

/// A (line, column) location in the template source, both 1-based.
///
/// Captured by the tokenizer when a token is recognized and attached to every
/// node for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Position {
    /// The first character of a document.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Create a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A type-safe index into the node tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// Where the token that produced this node started.
    pub position: Position,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

/// The closed set of node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// An element: the root, a plain markup element or a control element.
    Element(ElementData),
    /// Raw character data, possibly containing `{{ ... }}` placeholders.
    Text(String),
    /// A markup declaration such as `DOCTYPE html` (without `<!` and `>`).
    Declaration(String),
}

/// Discriminator for element variants.
///
/// The renderers match on this instead of on tag names, so adding a control
/// element means adding a variant here and a definition in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    /// The synthetic document root. Never emits a tag of its own.
    Root,
    /// Any element without a registered definition.
    Element,
    /// `<if>`: children are generated when its condition is truthy.
    If,
    /// `<else>`: children are generated when the preceding `<if>` was falsy.
    Else,
    /// `<for>`: children are generated once per collection item.
    For,
}

impl ElementKind {
    /// Returns true for the control-flow variants.
    #[must_use]
    pub const fn is_control(self) -> bool {
        matches!(self, Self::If | Self::Else | Self::For)
    }

    /// The reserved tag name a control variant is registered under.
    #[must_use]
    pub const fn reserved_tag(self) -> Option<&'static str> {
        match self {
            Self::If => Some("if"),
            Self::Else => Some("else"),
            Self::For => Some("for"),
            Self::Root | Self::Element => None,
        }
    }

    /// The factory that builds elements of this variant.
    #[must_use]
    pub fn factory(self) -> ElementFactory {
        match self {
            Self::Root | Self::Element => ElementData::element,
            Self::If => ElementData::if_block,
            Self::Else => ElementData::else_block,
            Self::For => ElementData::for_block,
        }
    }
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// "An element's local name", ASCII-lowercased by the tokenizer.
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// Which variant of element this is.
    pub kind: ElementKind,
    /// Void elements have no end tag and never receive children.
    pub is_void: bool,
}

impl ElementData {
    /// Create element data of the given kind.
    #[must_use]
    pub const fn new(kind: ElementKind, tag_name: String, attrs: AttributesMap) -> Self {
        Self {
            tag_name,
            attrs,
            kind,
            is_void: false,
        }
    }

    /// The synthetic document root.
    #[must_use]
    pub fn root() -> Self {
        Self::new(ElementKind::Root, ROOT_TAG_NAME.to_string(), AttributesMap::new())
    }

    /// Factory for plain elements. Used for every unregistered tag.
    #[must_use]
    pub const fn element(tag_name: String, attrs: AttributesMap) -> Self {
        Self::new(ElementKind::Element, tag_name, attrs)
    }

    /// Factory for `<if>`.
    #[must_use]
    pub const fn if_block(tag_name: String, attrs: AttributesMap) -> Self {
        Self::new(ElementKind::If, tag_name, attrs)
    }

    /// Factory for `<else>`.
    #[must_use]
    pub const fn else_block(tag_name: String, attrs: AttributesMap) -> Self {
        Self::new(ElementKind::Else, tag_name, attrs)
    }

    /// Factory for `<for>`.
    #[must_use]
    pub const fn for_block(tag_name: String, attrs: AttributesMap) -> Self {
        Self::new(ElementKind::For, tag_name, attrs)
    }

    /// Mark the element as void (or not).
    #[must_use]
    pub fn with_void(mut self, is_void: bool) -> Self {
        self.is_void = is_void;
        self
    }

    /// Returns the value of the named attribute if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns true for the synthetic document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.kind == ElementKind::Root
    }
}

/// Arena-based node tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. The root element is always at [`NodeId::ROOT`].
/// The tree is built once by the tree builder and only read afterwards.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding only the root element.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Element(ElementData::root()),
            position: Position::START,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Self { nodes: vec![root] }
    }

    /// Get the root element ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true: the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType, position: Position) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            position,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Returns true if `id` is an element that may receive children.
    #[must_use]
    pub fn accepts_children(&self, id: NodeId) -> bool {
        self.as_element(id).is_some_and(|data| !data.is_void)
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, updating all relationships.
    /// Appending to a void element, a text node or a declaration is ignored,
    /// as is appending a node that already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.accepts_children(parent)
            || child.0 >= self.nodes.len()
            || child == parent
            || self.nodes[child.0].parent.is_some()
        {
            return;
        }

        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Get the source position of a node.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.get(id).map(|n| n.position)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}
