//! Host element - attributes, state flags, property routing, shadow root.
//!
//! An [`Element`] is a cheap `Rc` handle onto one host element. Before a
//! component definition upgrades it, the element is inert: attributes are
//! plain data and property sets land in a plain bag. After upgrade, the
//! element dispatches through its installed [`ElementReactions`]: observed
//! attribute changes and property accesses route into the component's
//! reactive props, everything else stays plain.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::types::{DomError, ElementFlags};

use super::shadow::{ShadowRoot, ShadowRootMode};

// =============================================================================
// Element Reactions
// =============================================================================

/// The callbacks a component definition installs on an upgraded element.
///
/// This is the seam between the host document and the component layer: the
/// document only ever talks to an upgraded element through this trait.
pub trait ElementReactions {
    /// Called each time the element is connected to a document.
    fn connected(&self) {}

    /// Called each time the element is disconnected from a document.
    fn disconnected(&self) {}

    /// Called when an observed attribute is set (`new` is `Some`) or
    /// removed (`new` is `None`). `old` is the previous value, if any.
    fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>);

    /// True if `name` is one of the component's observed attributes.
    fn observes(&self, name: &str) -> bool;

    /// Read the property alias for an observed attribute.
    fn read_property(&self, name: &str) -> Option<String>;

    /// Write the property alias for an observed attribute.
    fn write_property(&self, name: &str, value: Option<String>);
}

// =============================================================================
// Element
// =============================================================================

/// A host element. Clones are handles onto the same element.
#[derive(Clone)]
pub struct Element {
    inner: Rc<ElementInner>,
}

struct ElementInner {
    tag_name: String,
    flags: Cell<ElementFlags>,
    attributes: RefCell<Vec<(String, String)>>,
    /// Property values assigned before upgrade. Construction drains the
    /// observed ones back through the accessor so no plain field shadows
    /// the reactive storage.
    pending_properties: RefCell<HashMap<String, String>>,
    shadow: RefCell<Option<ShadowRoot>>,
    reactions: RefCell<Option<Rc<dyn ElementReactions>>>,
}

impl Element {
    /// Create a detached, not-yet-upgraded element.
    ///
    /// Use [`Document::create_element`](super::Document::create_element) to
    /// create and immediately upgrade in one step; `Element::new` is the
    /// "element exists before its definition" path.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                tag_name: tag_name.into(),
                flags: Cell::new(ElementFlags::NONE),
                attributes: RefCell::new(Vec::new()),
                pending_properties: RefCell::new(HashMap::new()),
                shadow: RefCell::new(None),
                reactions: RefCell::new(None),
            }),
        }
    }

    /// The element's tag name.
    pub fn tag_name(&self) -> String {
        self.inner.tag_name.clone()
    }

    /// True if a component definition has been constructed for this element.
    pub fn is_upgraded(&self) -> bool {
        self.inner.flags.get().contains(ElementFlags::UPGRADED)
    }

    /// True if the element is currently connected to a document.
    pub fn is_connected(&self) -> bool {
        self.inner.flags.get().contains(ElementFlags::CONNECTED)
    }

    /// True if both handles refer to the same element.
    pub fn same_element(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        let mut flags = self.inner.flags.get();
        flags.set(ElementFlags::CONNECTED, connected);
        self.inner.flags.set(flags);
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Current value of an attribute.
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.inner
            .attributes
            .borrow()
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.clone())
    }

    /// True if the attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Snapshot of the attribute list, in document order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.inner.attributes.borrow().clone()
    }

    /// Set an attribute. On an upgraded element an observed name is
    /// reported through the attribute-changed reaction.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let old = {
            let mut attributes = self.inner.attributes.borrow_mut();
            match attributes.iter_mut().find(|(attr, _)| attr == name) {
                Some((_, slot)) => Some(std::mem::replace(slot, value.clone())),
                None => {
                    attributes.push((name.to_string(), value.clone()));
                    None
                }
            }
        };
        self.notify_attribute_changed(name, old.as_deref(), Some(value.as_str()));
    }

    /// Remove an attribute. On an upgraded element an observed name is
    /// reported as changing to "unset".
    pub fn remove_attribute(&self, name: &str) {
        let old = {
            let mut attributes = self.inner.attributes.borrow_mut();
            match attributes.iter().position(|(attr, _)| attr == name) {
                Some(position) => Some(attributes.remove(position).1),
                None => None,
            }
        };
        if let Some(old) = old {
            self.notify_attribute_changed(name, Some(old.as_str()), None);
        }
    }

    fn notify_attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) {
        if let Some(reactions) = self.reactions() {
            if reactions.observes(name) {
                reactions.attribute_changed(name, old, new);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    /// Read a property. Observed names on an upgraded element read through
    /// the component's reactive props; anything else reads the plain bag.
    pub fn property(&self, name: &str) -> Option<String> {
        if let Some(reactions) = self.reactions() {
            if reactions.observes(name) {
                return reactions.read_property(name);
            }
        }
        self.inner.pending_properties.borrow().get(name).cloned()
    }

    /// Write a property. Observed names on an upgraded element write
    /// through the component's reactive props and can trigger a re-render;
    /// anything else lands in the plain bag until (unless) an upgrade
    /// claims it.
    pub fn set_property(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(reactions) = self.reactions() {
            if reactions.observes(name) {
                reactions.write_property(name, Some(value));
                return;
            }
        }
        self.inner
            .pending_properties
            .borrow_mut()
            .insert(name.to_string(), value);
    }

    /// Remove a pre-upgrade property value, if one exists.
    pub(crate) fn take_pending_property(&self, name: &str) -> Option<String> {
        self.inner.pending_properties.borrow_mut().remove(name)
    }

    /// True if a plain pre-upgrade value is still stored for `name`.
    pub(crate) fn has_pending_property(&self, name: &str) -> bool {
        self.inner.pending_properties.borrow().contains_key(name)
    }

    // -------------------------------------------------------------------------
    // Shadow root
    // -------------------------------------------------------------------------

    /// Attach a shadow root. An element carries at most one.
    pub fn attach_shadow(&self, mode: ShadowRootMode) -> Result<ShadowRoot, DomError> {
        let mut shadow = self.inner.shadow.borrow_mut();
        if shadow.is_some() {
            return Err(DomError::ShadowAlreadyAttached(self.tag_name()));
        }
        let root = ShadowRoot::new(mode);
        *shadow = Some(root.clone());
        Ok(root)
    }

    /// The shadow root, if one is attached and open. A closed root is not
    /// reachable from here.
    pub fn shadow_root(&self) -> Option<ShadowRoot> {
        self.inner
            .shadow
            .borrow()
            .as_ref()
            .filter(|root| root.mode() == ShadowRootMode::Open)
            .cloned()
    }

    /// The shadow root regardless of mode.
    pub(crate) fn any_shadow_root(&self) -> Option<ShadowRoot> {
        self.inner.shadow.borrow().clone()
    }

    // -------------------------------------------------------------------------
    // Reactions
    // -------------------------------------------------------------------------

    /// Install a component's reactions and mark the element upgraded.
    pub(crate) fn install_reactions(&self, reactions: Rc<dyn ElementReactions>) {
        *self.inner.reactions.borrow_mut() = Some(reactions);
        let mut flags = self.inner.flags.get();
        flags |= ElementFlags::UPGRADED;
        self.inner.flags.set(flags);
    }

    pub(crate) fn reactions(&self) -> Option<Rc<dyn ElementReactions>> {
        self.inner.reactions.borrow().clone()
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag_name", &self.inner.tag_name)
            .field("flags", &self.inner.flags.get())
            .field("attributes", &*self.inner.attributes.borrow())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records dispatched reactions; observes only `value`.
    struct RecordingReactions {
        log: RefCell<Vec<String>>,
        store: RefCell<HashMap<String, String>>,
    }

    impl RecordingReactions {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                log: RefCell::new(Vec::new()),
                store: RefCell::new(HashMap::new()),
            })
        }
    }

    impl ElementReactions for RecordingReactions {
        fn connected(&self) {
            self.log.borrow_mut().push("connected".to_string());
        }

        fn disconnected(&self) {
            self.log.borrow_mut().push("disconnected".to_string());
        }

        fn attribute_changed(&self, name: &str, old: Option<&str>, new: Option<&str>) {
            self.log.borrow_mut().push(format!(
                "attr {name}: {:?} -> {:?}",
                old, new
            ));
        }

        fn observes(&self, name: &str) -> bool {
            name == "value"
        }

        fn read_property(&self, name: &str) -> Option<String> {
            self.store.borrow().get(name).cloned()
        }

        fn write_property(&self, name: &str, value: Option<String>) {
            match value {
                Some(value) => {
                    self.store.borrow_mut().insert(name.to_string(), value);
                }
                None => {
                    self.store.borrow_mut().remove(name);
                }
            }
        }
    }

    #[test]
    fn test_attributes_keep_document_order() {
        let element = Element::new("x-item");
        element.set_attribute("b", "2");
        element.set_attribute("a", "1");
        element.set_attribute("b", "3");

        assert_eq!(
            element.attributes(),
            vec![
                ("b".to_string(), "3".to_string()),
                ("a".to_string(), "1".to_string()),
            ]
        );
        assert_eq!(element.get_attribute("b"), Some("3".to_string()));

        element.remove_attribute("b");
        assert!(!element.has_attribute("b"));
    }

    #[test]
    fn test_properties_before_upgrade_stay_plain() {
        let element = Element::new("x-item");
        element.set_property("value", "early");

        assert!(!element.is_upgraded());
        assert_eq!(element.property("value"), Some("early".to_string()));
        assert!(element.has_pending_property("value"));
        assert_eq!(element.take_pending_property("value"), Some("early".to_string()));
        assert!(!element.has_pending_property("value"));
    }

    #[test]
    fn test_observed_dispatch_after_upgrade() {
        let element = Element::new("x-item");
        let reactions = RecordingReactions::new();
        element.install_reactions(reactions.clone());
        assert!(element.is_upgraded());

        // Observed attribute routes through the reaction.
        element.set_attribute("value", "1");
        element.remove_attribute("value");
        // Unobserved attribute does not.
        element.set_attribute("class", "big");

        assert_eq!(
            *reactions.log.borrow(),
            vec![
                "attr value: None -> Some(\"1\")".to_string(),
                "attr value: Some(\"1\") -> None".to_string(),
            ]
        );

        // Observed property routes into the component store.
        element.set_property("value", "5");
        assert_eq!(element.property("value"), Some("5".to_string()));
        assert!(!element.has_pending_property("value"));

        // Unobserved property stays in the plain bag.
        element.set_property("other", "x");
        assert!(element.has_pending_property("other"));
        assert_eq!(element.property("other"), Some("x".to_string()));
    }

    #[test]
    fn test_shadow_attach_once() {
        let element = Element::new("x-item");
        let root = element.attach_shadow(ShadowRootMode::Closed).unwrap();
        assert_eq!(root.mode(), ShadowRootMode::Closed);

        assert!(matches!(
            element.attach_shadow(ShadowRootMode::Open),
            Err(DomError::ShadowAlreadyAttached(_))
        ));
    }

    #[test]
    fn test_closed_root_not_reachable() {
        let element = Element::new("x-item");
        element.attach_shadow(ShadowRootMode::Closed).unwrap();
        assert!(element.shadow_root().is_none());
        assert!(element.any_shadow_root().is_some());

        let open = Element::new("x-open");
        open.attach_shadow(ShadowRootMode::Open).unwrap();
        assert!(open.shadow_root().is_some());
    }
}
