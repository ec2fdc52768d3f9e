//! Custom element registry - definitions and upgrades.
//!
//! One process-wide (thread-local) map from element name to its
//! [`Definition`]. Registration rejects duplicate names; upgrading an
//! element whose tag has a definition runs the definition's constructor,
//! installs the returned reactions, then replays any observed attributes
//! already present on the element through the attribute-changed reaction.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::types::DomError;

use super::element::{Element, ElementReactions};

// =============================================================================
// Definition
// =============================================================================

/// Constructor invoked once per element at upgrade time.
pub type Constructor = Rc<dyn Fn(&Element) -> Result<Rc<dyn ElementReactions>, DomError>>;

/// A registered custom element: name, observed attributes, constructor.
///
/// Immutable once created; registered at most once.
pub struct Definition {
    name: String,
    observed_attributes: Vec<String>,
    constructor: Constructor,
}

impl Definition {
    /// Build a definition.
    pub fn new(
        name: impl Into<String>,
        observed_attributes: Vec<String>,
        constructor: impl Fn(&Element) -> Result<Rc<dyn ElementReactions>, DomError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            observed_attributes,
            constructor: Rc::new(constructor),
        }
    }

    /// The element name this definition registers.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute names whose changes are reported to instances.
    pub fn observed_attributes(&self) -> &[String] {
        &self.observed_attributes
    }
}

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map element name to its definition.
    static DEFINITIONS: RefCell<HashMap<String, Rc<Definition>>> = RefCell::new(HashMap::new());
}

/// Register a definition. Fails on a duplicate name; the first
/// registration stays in place.
pub fn define_element(definition: Definition) -> Result<(), DomError> {
    DEFINITIONS.with(|definitions| {
        let mut definitions = definitions.borrow_mut();
        if definitions.contains_key(definition.name()) {
            return Err(DomError::DuplicateDefinition(definition.name().to_string()));
        }
        tracing::debug!(name = definition.name(), "custom element defined");
        definitions.insert(definition.name().to_string(), Rc::new(definition));
        Ok(())
    })
}

/// Look up the definition for an element name.
pub fn get_definition(name: &str) -> Option<Rc<Definition>> {
    DEFINITIONS.with(|definitions| definitions.borrow().get(name).cloned())
}

/// True if a definition is registered for `name`.
pub fn is_defined(name: &str) -> bool {
    DEFINITIONS.with(|definitions| definitions.borrow().contains_key(name))
}

// =============================================================================
// Upgrade
// =============================================================================

/// Upgrade an element if its tag has a definition. Idempotent; an element
/// with no matching definition is left untouched.
///
/// The constructor runs first. Observed attributes already present on the
/// element are then replayed through the attribute-changed reaction, so an
/// attribute written in markup before the definition existed reaches the
/// component's reactive props the same way a later change would.
pub fn upgrade(element: &Element) -> Result<(), DomError> {
    if element.is_upgraded() {
        return Ok(());
    }
    let Some(definition) = get_definition(&element.tag_name()) else {
        return Ok(());
    };

    let reactions = (definition.constructor)(element)?;
    element.install_reactions(reactions.clone());
    tracing::debug!(name = definition.name(), "element upgraded");

    for name in definition.observed_attributes() {
        if let Some(value) = element.get_attribute(name) {
            reactions.attribute_changed(name, None, Some(value.as_str()));
        }
    }
    Ok(())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Clear all registered definitions (for testing).
pub fn reset_registry() {
    DEFINITIONS.with(|definitions| definitions.borrow_mut().clear());
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct NullReactions;

    impl ElementReactions for NullReactions {
        fn attribute_changed(&self, _name: &str, _old: Option<&str>, _new: Option<&str>) {}

        fn observes(&self, _name: &str) -> bool {
            false
        }

        fn read_property(&self, _name: &str) -> Option<String> {
            None
        }

        fn write_property(&self, _name: &str, _value: Option<String>) {}
    }

    fn null_definition(name: &str) -> Definition {
        Definition::new(name, Vec::new(), |_element| Ok(Rc::new(NullReactions)))
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        reset_registry();

        define_element(null_definition("x-a")).unwrap();
        assert!(is_defined("x-a"));

        let err = define_element(null_definition("x-a")).unwrap_err();
        assert!(matches!(err, DomError::DuplicateDefinition(name) if name == "x-a"));
    }

    #[test]
    fn test_upgrade_without_definition_is_noop() {
        reset_registry();

        let element = Element::new("x-unknown");
        upgrade(&element).unwrap();
        assert!(!element.is_upgraded());
    }

    #[test]
    fn test_upgrade_runs_constructor_once() {
        reset_registry();

        let constructions = Rc::new(Cell::new(0));
        let constructions_clone = constructions.clone();
        define_element(Definition::new("x-once", Vec::new(), move |_element| {
            constructions_clone.set(constructions_clone.get() + 1);
            Ok(Rc::new(NullReactions) as Rc<dyn ElementReactions>)
        }))
        .unwrap();

        let element = Element::new("x-once");
        upgrade(&element).unwrap();
        upgrade(&element).unwrap();

        assert!(element.is_upgraded());
        assert_eq!(constructions.get(), 1);
    }

    #[test]
    fn test_upgrade_replays_present_attributes() {
        use std::cell::RefCell;

        reset_registry();

        struct AttrLog {
            seen: RefCell<Vec<(String, Option<String>)>>,
        }

        impl ElementReactions for AttrLog {
            fn attribute_changed(&self, name: &str, _old: Option<&str>, new: Option<&str>) {
                self.seen
                    .borrow_mut()
                    .push((name.to_string(), new.map(String::from)));
            }

            fn observes(&self, name: &str) -> bool {
                name == "count"
            }

            fn read_property(&self, _name: &str) -> Option<String> {
                None
            }

            fn write_property(&self, _name: &str, _value: Option<String>) {}
        }

        let log = Rc::new(AttrLog {
            seen: RefCell::new(Vec::new()),
        });
        let log_clone = log.clone();
        define_element(Definition::new(
            "x-attrs",
            vec!["count".to_string()],
            move |_element| Ok(log_clone.clone() as Rc<dyn ElementReactions>),
        ))
        .unwrap();

        let element = Element::new("x-attrs");
        element.set_attribute("count", "7");
        element.set_attribute("class", "wide");
        upgrade(&element).unwrap();

        assert_eq!(
            *log.seen.borrow(),
            vec![("count".to_string(), Some("7".to_string()))]
        );
    }
}
