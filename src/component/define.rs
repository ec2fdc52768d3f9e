//! Component definition - the `define` entry point and the render effect.
//!
//! `define` registers a custom element whose instances are driven by a
//! factory function: the factory runs once per element, may register
//! lifecycle callbacks, and returns the template producer that the render
//! effect re-invokes whenever a reactive value it read has changed.
//!
//! # Example
//!
//! ```ignore
//! use spark_elements::{define, on_mounted, Document, Template};
//!
//! define("x-counter", &["count"], |_el, props| {
//!     let mounted_props = props.clone();
//!     on_mounted(move || {
//!         if !mounted_props.is_set("count") {
//!             mounted_props.set("count", "0");
//!         }
//!     });
//!     Box::new(move || Template::text(format!(
//!         "count={}",
//!         props.get("count").unwrap_or_default()
//!     )))
//! })?;
//!
//! let document = Document::new();
//! let counter = document.create_element("x-counter")?;
//! document.append(&counter)?;                  // renders "count=0"
//! counter.set_property("count", "5");          // re-renders "count=5"
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::effect;

use crate::dom::{
    define_element, Definition, Element, ElementReactions, ShadowRoot, ShadowRootMode,
};
use crate::template::{render, Template};
use crate::types::{DefineError, DomError, Phase};

use super::lifecycle::{LifecycleCallbacks, RegistrationScope};
use super::props::ReactiveProps;

// =============================================================================
// Definition Entry Point
// =============================================================================

/// Zero-argument function yielding the current template description.
/// Re-invoked on every render pass, so reads of reactive props that should
/// trigger re-rendering belong inside it, not in the factory body.
pub type TemplateProducer = Box<dyn Fn() -> Template>;

/// Factory shared by every instance of one definition.
type RenderFactory = Rc<dyn Fn(&Element, ReactiveProps) -> TemplateProducer>;

/// Define and register a custom element.
///
/// `observed_attributes` lists the attribute names whose changes are
/// mirrored into each instance's reactive props; pass `&[]` for none.
/// `factory` runs once per instance with the host element and its fresh
/// props, and returns the template producer.
///
/// Fails fast on a malformed configuration (empty or hyphen-less name,
/// empty or duplicate attribute names) and surfaces the registry's
/// duplicate-name rejection unmasked.
pub fn define(
    name: &str,
    observed_attributes: &[&str],
    factory: impl Fn(&Element, ReactiveProps) -> TemplateProducer + 'static,
) -> Result<(), DefineError> {
    if name.is_empty() {
        return Err(DefineError::EmptyName);
    }
    if !name.contains('-') {
        return Err(DefineError::InvalidName(name.to_string()));
    }

    let mut observed: Vec<String> = Vec::with_capacity(observed_attributes.len());
    for &attribute in observed_attributes {
        if attribute.is_empty() {
            return Err(DefineError::EmptyAttributeName);
        }
        if observed.iter().any(|existing| existing == attribute) {
            return Err(DefineError::DuplicateAttribute(attribute.to_string()));
        }
        observed.push(attribute.to_string());
    }

    let factory: RenderFactory = Rc::new(factory);
    let constructor_observed = observed.clone();
    let definition = Definition::new(name, observed, move |element: &Element| {
        construct(element, &constructor_observed, &factory)
    });
    define_element(definition)?;
    tracing::debug!(name, "component defined");
    Ok(())
}

// =============================================================================
// Component Instance
// =============================================================================

/// Per-element state: created at upgrade, installed as the element's
/// reactions, kept alive by the element for the element's lifetime.
struct ComponentInstance {
    observed: Vec<String>,
    props: ReactiveProps,
    callbacks: Rc<LifecycleCallbacks>,
    /// False until the first render pass completes; never reverts.
    mounted: Cell<bool>,
    shadow_root: ShadowRoot,
    /// Stop handle for the render effect. Disconnecting does NOT stop the
    /// effect - a detached instance keeps rendering and a reconnect
    /// resumes seamlessly. The handle fires when the instance drops.
    stop_effect: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Drop for ComponentInstance {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_effect.get_mut().take() {
            stop();
        }
    }
}

/// Per-instance construction, run once per element at upgrade time.
fn construct(
    element: &Element,
    observed: &[String],
    factory: &RenderFactory,
) -> Result<Rc<dyn ElementReactions>, DomError> {
    // 1. Fresh reactive props, exclusively owned by this instance.
    let props = ReactiveProps::new();
    let callbacks = Rc::new(LifecycleCallbacks::new());

    // 2-4. Run the factory inside the registration window so synchronous
    //      hook calls attach to this instance and no other.
    let producer = {
        let _scope = RegistrationScope::enter(callbacks.clone());
        factory(element, props.clone())
    };

    // 5. Before-mount, strictly before the first render pass.
    callbacks.fire(Phase::BeforeMount);

    // 6. Closed encapsulation boundary.
    let shadow_root = element.attach_shadow(ShadowRootMode::Closed)?;

    let instance = Rc::new(ComponentInstance {
        observed: observed.to_vec(),
        props,
        callbacks,
        mounted: Cell::new(false),
        shadow_root,
        stop_effect: RefCell::new(None),
    });

    // 7. The render effect: runs immediately, then re-runs whenever a
    //    reactive value the producer read has changed. Holds the instance
    //    weakly - the element owns the instance, and dropping it stops
    //    the effect via Drop.
    let weak = Rc::downgrade(&instance);
    let stop = effect(move || {
        let Some(instance) = weak.upgrade() else {
            return;
        };
        let updating = instance.mounted.get();
        if updating {
            instance.callbacks.fire(Phase::BeforeUpdate);
        }
        render(&producer(), &instance.shadow_root);
        if updating {
            instance.callbacks.fire(Phase::Updated);
        } else {
            instance.mounted.set(true);
        }
    });
    *instance.stop_effect.borrow_mut() = Some(Box::new(stop));

    // 8. Properties assigned before the upgrade ran must flow through the
    //    accessor into reactive props instead of shadowing it.
    for name in &instance.observed {
        if let Some(value) = element.take_pending_property(name) {
            instance.write_property(name, Some(value));
        }
    }

    Ok(instance)
}

impl ElementReactions for ComponentInstance {
    fn connected(&self) {
        self.callbacks.fire(Phase::Mounted);
    }

    fn disconnected(&self) {
        self.callbacks.fire(Phase::Unmounted);
    }

    fn attribute_changed(&self, name: &str, _old: Option<&str>, new: Option<&str>) {
        self.props.write(name, new.map(String::from));
    }

    fn observes(&self, name: &str) -> bool {
        self.observed.iter().any(|attribute| attribute == name)
    }

    fn read_property(&self, name: &str) -> Option<String> {
        self.props.get(name)
    }

    fn write_property(&self, name: &str, value: Option<String>) {
        self.props.write(name, value);
    }
}

// =============================================================================
// Tests
// =============================================================================
