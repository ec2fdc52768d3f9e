//! Document - the connect/disconnect driver.
//!
//! A [`Document`] owns the list of connected top-level elements. Appending
//! upgrades the element (if its tag has a definition) and fires its
//! connected reaction; removing fires the disconnected reaction. An
//! element may disconnect and reconnect any number of times; reactions
//! fire on every occurrence.

use std::cell::RefCell;

use crate::types::DomError;

use super::element::Element;
use super::registry;

// =============================================================================
// Document
// =============================================================================

/// A minimal host document: a flat list of connected elements.
pub struct Document {
    children: RefCell<Vec<Element>>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            children: RefCell::new(Vec::new()),
        }
    }

    /// Create an element, upgrading it immediately when its tag already
    /// has a definition.
    pub fn create_element(&self, tag_name: impl Into<String>) -> Result<Element, DomError> {
        let element = Element::new(tag_name);
        registry::upgrade(&element)?;
        Ok(element)
    }

    /// Connect an element: upgrade if possible, add to the document, fire
    /// the connected reaction. No-op if the element is already connected.
    pub fn append(&self, element: &Element) -> Result<(), DomError> {
        if element.is_connected() {
            return Ok(());
        }
        registry::upgrade(element)?;

        self.children.borrow_mut().push(element.clone());
        element.set_connected(true);
        if let Some(reactions) = element.reactions() {
            reactions.connected();
        }
        Ok(())
    }

    /// Disconnect an element: remove it and fire the disconnected
    /// reaction. No-op if the element is not in this document.
    pub fn remove(&self, element: &Element) {
        let position = {
            let mut children = self.children.borrow_mut();
            match children.iter().position(|child| child.same_element(element)) {
                Some(position) => {
                    children.remove(position);
                    Some(position)
                }
                None => None,
            }
        };
        if position.is_some() {
            element.set_connected(false);
            if let Some(reactions) = element.reactions() {
                reactions.disconnected();
            }
        }
    }

    /// True if the element is connected to this document.
    pub fn contains(&self, element: &Element) -> bool {
        self.children
            .borrow()
            .iter()
            .any(|child| child.same_element(element))
    }

    /// Snapshot of the connected elements, in connection order.
    pub fn children(&self) -> Vec<Element> {
        self.children.borrow().clone()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_remove_track_connection() {
        registry::reset_registry();

        let document = Document::new();
        let element = Element::new("x-plain");

        document.append(&element).unwrap();
        assert!(element.is_connected());
        assert!(document.contains(&element));

        // Reappending a connected element changes nothing.
        document.append(&element).unwrap();
        assert_eq!(document.children().len(), 1);

        document.remove(&element);
        assert!(!element.is_connected());
        assert!(!document.contains(&element));

        // Removing again is a no-op.
        document.remove(&element);
    }

    #[test]
    fn test_create_element_without_definition() {
        registry::reset_registry();

        let document = Document::new();
        let element = document.create_element("x-later").unwrap();
        assert!(!element.is_upgraded());
    }
}
