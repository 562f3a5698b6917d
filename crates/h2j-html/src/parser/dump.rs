//! Indented tree dumps, one node per line.
//!
//! ```text
//! <root-element>
//!   <ul>
//!     <for each="items" as="item"> [for]
//!       <li>
//!         "{{item.name}}"
//! ```

use std::fmt::Write;

use h2j_dom::{DomTree, ElementKind, NodeId, NodeType};

/// Render the subtree rooted at `id`.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, id, 0);
    out
}

/// Print the subtree rooted at `id` to stdout.
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", format_tree(tree, id));
}

fn write_node(out: &mut String, tree: &DomTree, id: NodeId, indent: usize) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let _ = match &node.node_type {
        NodeType::Element(data) => {
            let attrs: String = data
                .attrs
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        format!(" {k}")
                    } else {
                        format!(" {k}=\"{v}\"")
                    }
                })
                .collect();
            match data.kind {
                ElementKind::Element | ElementKind::Root => {
                    writeln!(out, "{prefix}<{}{attrs}>", data.tag_name)
                }
                kind => writeln!(out, "{prefix}<{}{attrs}> [{kind}]", data.tag_name),
            }
        }
        NodeType::Text(data) => writeln!(out, "{prefix}\"{}\"", data.replace('\n', "\\n")),
        NodeType::Declaration(content) => writeln!(out, "{prefix}<!{content}>"),
    };
    for &child in tree.children(id) {
        write_node(out, tree, child, indent + 1);
    }
}
