//! XML encoding with the legacy tab-indentation convention
//!
//! The editor's file format indents with tabs, one per nesting level, and
//! has a deliberate asymmetry inherited from its original serializer: a node
//! with children emits a newline plus `level + 1` tabs in place of its text,
//! and only the *last* child is followed by a newline plus `level` tabs so
//! the closing tag lines up. Sibling elements are not separated at all.
//!
//! Indentation is computed from tree depth at encode time and never stored
//! on the nodes, so encoding is a pure function of the tree and encoding the
//! same tree twice yields identical bytes.

use crate::node::Node;

/// Serialize a tree to XML text. UTF-8, no declaration line.
pub fn serialize(root: &Node) -> String {
    let mut output = String::new();
    write_element(root, 0, &mut output);
    output
}

fn write_element(node: &Node, level: usize, output: &mut String) {
    output.push('<');
    output.push_str(node.tag());

    if let Some(value) = node.attribute() {
        output.push_str(" name=\"");
        output.push_str(&escape_attribute(value));
        output.push('"');
    }

    if !node.has_children() {
        match node.text() {
            // Absent text collapses to a self-closing tag, `Some("")` keeps
            // an explicit open/close pair.
            None => output.push_str(" />"),
            Some(text) => {
                output.push('>');
                output.push_str(&escape_text(text));
                close_tag(node, output);
            }
        }
        return;
    }

    output.push('>');
    push_indent(output, level + 1);
    for child in node.children() {
        write_element(child, level + 1, output);
    }
    push_indent(output, level);
    close_tag(node, output);
}

fn close_tag(node: &Node, output: &mut String) {
    output.push_str("</");
    output.push_str(node.tag());
    output.push('>');
}

fn push_indent(output: &mut String, tabs: usize) {
    output.push('\n');
    for _ in 0..tabs {
        output.push('\t');
    }
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
