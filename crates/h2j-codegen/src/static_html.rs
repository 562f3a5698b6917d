//! Static HTML rendering.
//!
//! Serializes the node tree back to markup without evaluating anything:
//! bindings stay as written and `<if>`, `<else>` and `<for>` render as plain
//! tags. Text is emitted verbatim and attribute values are escaped.

use h2j_common::escape;
use h2j_dom::{DomTree, NodeId, NodeType};

/// Render the whole document. The root element contributes only its
/// children.
#[must_use]
pub fn to_html(tree: &DomTree) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, tree.root());
    out
}

fn write_children(out: &mut String, tree: &DomTree, id: NodeId) {
    for &child in tree.children(id) {
        write_node(out, tree, child);
    }
}

fn write_node(out: &mut String, tree: &DomTree, id: NodeId) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Element(data) if data.is_root() => write_children(out, tree, id),
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);
            for (name, value) in &data.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
            out.push('>');
            write_children(out, tree, id);
            if !data.is_void {
                out.push_str("</");
                out.push_str(&data.tag_name);
                out.push('>');
            }
        }
        NodeType::Text(text) => out.push_str(text),
        NodeType::Declaration(content) => {
            out.push_str("<!");
            out.push_str(content);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> String {
        to_html(&h2j_html::parse(source))
    }

    #[test]
    fn test_root_tag_is_not_emitted() {
        assert_eq!(render(""), "");
        assert_eq!(render("<p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        assert_eq!(render(r#"<img src="x"><p>"#), r#"<img src="x"><p></p>"#);
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        assert_eq!(
            render(r#"<a title='say "hi" & go'>"#),
            r#"<a title="say &quot;hi&quot; &amp; go"></a>"#
        );
    }

    #[test]
    fn test_control_elements_render_as_tags() {
        assert_eq!(
            render(r#"<if test="a">{{a}}</if><else>none</else>"#),
            r#"<if test="a">{{a}}</if><else>none</else>"#
        );
    }

    #[test]
    fn test_text_and_declaration_are_verbatim() {
        assert_eq!(
            render("<!DOCTYPE html>1 &lt; 2 & 3"),
            "<!DOCTYPE html>1 &lt; 2 & 3"
        );
    }
}
