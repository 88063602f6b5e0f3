//! Tree-document model
//!
//! A [`Node`] mirrors one XML element of the editor's constrained schema:
//! a tag, at most one attribute (the conventional `name` attribute), optional
//! direct text, and an ordered list of children. Children are exclusively
//! owned by their parent, so a document is always a tree.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result, Span};

/// One element of a tree document
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    tag: String,
    attribute: Option<String>,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    /// Create a leaf node. The tag must not be empty.
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::new(ErrorKind::EmptyTag, Span::empty()));
        }
        Ok(Self {
            tag,
            attribute: None,
            text: None,
            children: Vec::new(),
        })
    }

    /// Set the `name` attribute, builder style
    pub fn with_attribute(mut self, value: impl Into<String>) -> Self {
        self.attribute = Some(value.into());
        self
    }

    /// Set the direct text, builder style
    pub fn with_text(mut self, value: impl Into<String>) -> Self {
        self.text = Some(value.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Mutable access to a child by index
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    /// Replace the tag. An empty tag cannot round-trip through the codec
    /// and is rejected.
    pub fn set_tag(&mut self, tag: impl Into<String>) -> Result<()> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::new(ErrorKind::EmptyTag, Span::empty()));
        }
        self.tag = tag;
        Ok(())
    }

    /// Replace the `name` attribute; `None` removes it
    pub fn set_attribute(&mut self, value: Option<String>) {
        self.attribute = value;
    }

    /// Replace the direct text; `None` removes it
    pub fn set_text(&mut self, value: Option<String>) {
        self.text = value;
    }

    /// Append a child, preserving document order
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Deep-copy this subtree. The copy shares nothing with the source:
    /// editing the copy or any of its descendants leaves the source intact.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Remove and return the child at `index`.
    ///
    /// Fails with [`ErrorKind::NodeNotFound`] when the index is out of
    /// range; the children are left unmodified in that case.
    pub fn detach(&mut self, index: usize) -> Result<Node> {
        if index >= self.children.len() {
            return Err(Error::new(ErrorKind::NodeNotFound, Span::empty()));
        }
        Ok(self.children.remove(index))
    }

    /// Remove and return the first child equal to `child`.
    ///
    /// Fails with [`ErrorKind::NodeNotFound`] when no current child matches;
    /// the children are left unmodified in that case.
    pub fn detach_child(&mut self, child: &Node) -> Result<Node> {
        match self.children.iter().position(|c| c == child) {
            Some(index) => Ok(self.children.remove(index)),
            None => Err(Error::new(ErrorKind::NodeNotFound, Span::empty())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let mut root = Node::new("root").unwrap();
        root.push_child(
            Node::new("child")
                .unwrap()
                .with_attribute("x")
                .with_text("hi"),
        );
        root.push_child(Node::new("other").unwrap());
        root
    }

    #[test]
    fn test_new_rejects_empty_tag() {
        let err = Node::new("").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EmptyTag);
    }

    #[test]
    fn test_set_tag_rejects_empty() {
        let mut node = Node::new("a").unwrap();
        let err = node.set_tag("").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EmptyTag);
        assert_eq!(node.tag(), "a");
    }

    #[test]
    fn test_set_fields() {
        let mut node = Node::new("a").unwrap();
        node.set_tag("b").unwrap();
        node.set_attribute(Some("n".to_string()));
        node.set_text(Some("t".to_string()));
        assert_eq!(node.tag(), "b");
        assert_eq!(node.attribute(), Some("n"));
        assert_eq!(node.text(), Some("t"));
        node.set_attribute(None);
        node.set_text(None);
        assert_eq!(node.attribute(), None);
        assert_eq!(node.text(), None);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let root = sample_tree();
        let mut copy = root.duplicate();
        assert_eq!(copy, root);

        copy.set_text(Some("changed".to_string()));
        assert_eq!(root.text(), None);

        copy.child_mut(0).unwrap().set_text(Some("also".to_string()));
        assert_eq!(root.children()[0].text(), Some("hi"));
    }

    #[test]
    fn test_detach_by_index() {
        let mut root = sample_tree();
        let removed = root.detach(0).unwrap();
        assert_eq!(removed.tag(), "child");
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].tag(), "other");
    }

    #[test]
    fn test_detach_out_of_range() {
        let mut root = sample_tree();
        let err = root.detach(2).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NodeNotFound);
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_detach_child_not_member() {
        let mut root = sample_tree();
        let stranger = Node::new("stranger").unwrap();
        let err = root.detach_child(&stranger).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NodeNotFound);
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_detach_child_member() {
        let mut root = sample_tree();
        let target = root.children()[1].clone();
        let removed = root.detach_child(&target).unwrap();
        assert_eq!(removed.tag(), "other");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_child_order_is_preserved() {
        let mut root = Node::new("a").unwrap();
        for tag in ["b", "c", "d"] {
            root.push_child(Node::new(tag).unwrap());
        }
        let tags: Vec<&str> = root.children().iter().map(Node::tag).collect();
        assert_eq!(tags, ["b", "c", "d"]);
    }
}
