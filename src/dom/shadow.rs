//! Shadow root - the encapsulation boundary components render into.
//!
//! Each upgraded element carries exactly one shadow root. The component
//! layer attaches a closed root during construction; a closed root is not
//! reachable through [`Element::shadow_root`](super::Element::shadow_root),
//! so nothing outside the instance can reach into its rendered tree.

use std::cell::RefCell;
use std::rc::Rc;

use super::node::Node;

// =============================================================================
// Shadow Root Mode
// =============================================================================

/// Visibility of a shadow root from the owning element's public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowRootMode {
    /// Reachable via `Element::shadow_root`.
    Open,
    /// Hidden from the element's public API; only the component instance
    /// that attached it holds the handle.
    Closed,
}

// =============================================================================
// Shadow Root
// =============================================================================

/// An isolated rendering root attached to one element.
///
/// Handles are cheap to clone and refer to the same underlying root.
#[derive(Clone)]
pub struct ShadowRoot {
    inner: Rc<ShadowRootInner>,
}

struct ShadowRootInner {
    mode: ShadowRootMode,
    children: RefCell<Vec<Node>>,
}

impl ShadowRoot {
    pub(crate) fn new(mode: ShadowRootMode) -> Self {
        Self {
            inner: Rc::new(ShadowRootInner {
                mode,
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The mode this root was attached with.
    pub fn mode(&self) -> ShadowRootMode {
        self.inner.mode
    }

    /// Snapshot of the root's current child handles.
    pub fn child_nodes(&self) -> Vec<Node> {
        self.inner.children.borrow().clone()
    }

    /// Concatenated text of everything rendered into this root.
    pub fn text_content(&self) -> String {
        self.inner
            .children
            .borrow()
            .iter()
            .map(Node::text_content)
            .collect()
    }

    /// The mutable child list, for the reconciler.
    pub(crate) fn children(&self) -> &RefCell<Vec<Node>> {
        &self.inner.children
    }
}

impl std::fmt::Debug for ShadowRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowRoot")
            .field("mode", &self.inner.mode)
            .field("children", &*self.inner.children.borrow())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
