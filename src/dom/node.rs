//! Rendered nodes - the output side of reconciliation.
//!
//! A [`Node`] is what actually lives inside a shadow root after a render
//! pass: a text node with mutable data, or an element node with a tag,
//! attributes, and children. Nodes are cheap `Rc` handles with stable
//! identity, so tests can distinguish "patched in place" from "replaced".

use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// Node
// =============================================================================

/// A rendered node inside a shadow root.
///
/// Handles are cheap to clone; two clones refer to the same underlying
/// node. Identity is observable through [`Node::same_node`].
#[derive(Clone)]
pub struct Node {
    inner: Rc<NodeKind>,
}

pub(crate) enum NodeKind {
    Text(RefCell<String>),
    Element(ElementNode),
}

pub(crate) struct ElementNode {
    pub(crate) tag: String,
    pub(crate) attributes: RefCell<Vec<(String, String)>>,
    pub(crate) children: RefCell<Vec<Node>>,
}

impl Node {
    pub(crate) fn new_text(data: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(NodeKind::Text(RefCell::new(data.into()))),
        }
    }

    pub(crate) fn new_element(
        tag: impl Into<String>,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    ) -> Self {
        Self {
            inner: Rc::new(NodeKind::Element(ElementNode {
                tag: tag.into(),
                attributes: RefCell::new(attributes),
                children: RefCell::new(children),
            })),
        }
    }

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.inner
    }

    /// True if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(*self.inner, NodeKind::Text(_))
    }

    /// True if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(*self.inner, NodeKind::Element(_))
    }

    /// Tag name, for element nodes.
    pub fn tag(&self) -> Option<String> {
        match &*self.inner {
            NodeKind::Element(element) => Some(element.tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Text data, for text nodes.
    pub fn text(&self) -> Option<String> {
        match &*self.inner {
            NodeKind::Text(data) => Some(data.borrow().clone()),
            NodeKind::Element(_) => None,
        }
    }

    /// Attribute value by name, for element nodes.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &*self.inner {
            NodeKind::Element(element) => element
                .attributes
                .borrow()
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Snapshot of the attribute list, for element nodes.
    pub fn attributes(&self) -> Vec<(String, String)> {
        match &*self.inner {
            NodeKind::Element(element) => element.attributes.borrow().clone(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    /// Snapshot of the child handles, for element nodes.
    pub fn child_nodes(&self) -> Vec<Node> {
        match &*self.inner {
            NodeKind::Element(element) => element.children.borrow().clone(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    /// Concatenated text of this node's subtree.
    pub fn text_content(&self) -> String {
        match &*self.inner {
            NodeKind::Text(data) => data.borrow().clone(),
            NodeKind::Element(element) => element
                .children
                .borrow()
                .iter()
                .map(Node::text_content)
                .collect(),
        }
    }

    /// True if both handles refer to the same underlying node.
    pub fn same_node(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.inner {
            NodeKind::Text(data) => f.debug_tuple("Text").field(&*data.borrow()).finish(),
            NodeKind::Element(element) => f
                .debug_struct("Element")
                .field("tag", &element.tag)
                .field("attributes", &*element.attributes.borrow())
                .field("children", &*element.children.borrow())
                .finish(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
