//! Property-based tests for the tree codec
//!
//! These tests use proptest to verify:
//! 1. Roundtrip property: structure, attributes and leaf text survive
//!    serialize -> parse for arbitrary trees
//! 2. Idempotence: re-serializing a parsed document reproduces it exactly
//! 3. Arbitrary input never panics the parser

use proptest::prelude::*;
use zenxml::{parse, serialize, Node};

fn arb_tag() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_.-]{0,11}"
}

fn arb_attr() -> impl Strategy<Value = String> {
    // Printable ASCII; quotes and markup characters are escaped on encode
    "[ -~]{0,16}"
}

fn arb_text() -> impl Strategy<Value = String> {
    // Non-empty: empty text and absent text are the same thing on the wire
    "[ -~]{1,24}"
}

fn arb_leaf() -> impl Strategy<Value = Node> {
    (
        arb_tag(),
        prop::option::of(arb_attr()),
        prop::option::of(arb_text()),
    )
        .prop_map(|(tag, attribute, text)| {
            let mut node = Node::new(tag).unwrap();
            node.set_attribute(attribute);
            node.set_text(text);
            node
        })
}

fn arb_tree() -> impl Strategy<Value = Node> {
    arb_leaf().prop_recursive(4, 32, 5, |inner| {
        (
            arb_tag(),
            prop::option::of(arb_attr()),
            prop::collection::vec(inner, 1..5),
        )
            .prop_map(|(tag, attribute, children)| {
                let mut node = Node::new(tag).unwrap();
                node.set_attribute(attribute);
                for child in children {
                    node.push_child(child);
                }
                node
            })
    })
}

/// Compare trees the way the codec preserves them: text on a node with
/// children is formatting whitespace and is regenerated on encode, so it is
/// only compared on leaves.
fn assert_equivalent(parsed: &Node, original: &Node) {
    assert_eq!(parsed.tag(), original.tag());
    assert_eq!(parsed.attribute(), original.attribute());
    if !original.has_children() {
        assert_eq!(parsed.text(), original.text());
    }
    assert_eq!(parsed.children().len(), original.children().len());
    for (p, o) in parsed.children().iter().zip(original.children()) {
        assert_equivalent(p, o);
    }
}

proptest! {
    /// Structure, attributes and leaf text survive a roundtrip
    #[test]
    fn roundtrip_preserves_tree(tree in arb_tree()) {
        let xml = serialize(&tree);
        let parsed = parse(&xml).unwrap();
        assert_equivalent(&parsed, &tree);
    }

    /// Leaf documents roundtrip exactly, text included
    #[test]
    fn leaf_roundtrip_is_exact(leaf in arb_leaf()) {
        let xml = serialize(&leaf);
        let parsed = parse(&xml).unwrap();
        prop_assert_eq!(parsed, leaf);
    }

    /// Serializing a parsed document reproduces its bytes
    #[test]
    fn serialization_is_idempotent(tree in arb_tree()) {
        let first = serialize(&tree);
        let parsed = parse(&first).unwrap();
        prop_assert_eq!(serialize(&parsed), first);
    }

    /// The parser returns an error or a tree, never panics
    #[test]
    fn arbitrary_input_never_panics(s in "[ -~<>&;\"']{0,64}") {
        let _result = parse(&s);
    }

    /// A parent's emitted whitespace always matches its depth
    #[test]
    fn parent_whitespace_matches_depth(tree in arb_tree()) {
        let parsed = parse(&serialize(&tree)).unwrap();
        check_whitespace(&parsed, 0);
    }
}

fn check_whitespace(node: &Node, level: usize) {
    if node.has_children() {
        let expected = format!("\n{}", "\t".repeat(level + 1));
        assert_eq!(node.text(), Some(expected.as_str()));
        for child in node.children() {
            check_whitespace(child, level + 1);
        }
    }
}
